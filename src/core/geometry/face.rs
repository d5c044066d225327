use glam::Vec3;

/// A planar polygon given as a loop of indices into a shape's vertex buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<usize>,
}

impl Face {
    pub fn new(vertices: impl Into<Vec<usize>>) -> Self {
        Self {
            vertices: vertices.into(),
        }
    }

    /// The first three corners of the face, looked up in `positions`.
    pub fn leading_corners(&self, positions: &[Vec3]) -> Option<[Vec3; 3]> {
        match self.vertices.as_slice() {
            [a, b, c, ..] => Some([positions[*a], positions[*b], positions[*c]]),
            _ => None,
        }
    }

    /// Unit normal from the first three corners.
    ///
    /// Counter-clockwise winding (seen from outside) gives an outward normal:
    /// (v1 - v0) × (v2 - v0). A degenerate face yields `Vec3::ZERO`.
    pub fn normal(&self, positions: &[Vec3]) -> Vec3 {
        match self.leading_corners(positions) {
            Some([v0, v1, v2]) => (v1 - v0).cross(v2 - v0).normalize_or_zero(),
            None => Vec3::ZERO,
        }
    }
}
