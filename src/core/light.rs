use glam::Vec3;

use crate::core::geometry::Face;

/// Brightness ramp from sparse to dense.
pub const ASCII_RAMP: [char; 10] = [' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Brightness floor added to every shaded face.
pub const AMBIENT: f32 = 0.2;

/// A point light fixed in world space for the whole session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
}

impl Light {
    /// Up and to the left of the viewer.
    pub const DEFAULT_POSITION: Vec3 = Vec3::new(-30.0, 30.0, -50.0);

    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION)
    }
}

/// Flat (one value per face) diffuse shading with an ambient floor, mapped
/// onto an ASCII ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadingModel {
    light: Light,
    ambient: f32,
}

impl ShadingModel {
    pub fn new(light: Light, ambient: f32) -> Self {
        Self { light, ambient }
    }

    /// Brightness in `[ambient, 1]` of the plane through `v0`, `v1`, `v2`.
    ///
    /// Zero-length normals or light directions leave only the ambient term.
    pub fn brightness(&self, [v0, v1, v2]: [Vec3; 3]) -> f32 {
        let normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
        let light_dir = (self.light.position - v0).normalize_or_zero();
        let diffuse = normal.dot(light_dir).max(0.0);
        (self.ambient + (1.0 - self.ambient) * diffuse).min(1.0)
    }

    /// Brightness of `face` with its corners taken from the rotated vertex
    /// buffer `positions`.
    pub fn face_brightness(&self, face: &Face, positions: &[Vec3]) -> f32 {
        face.leading_corners(positions)
            .map_or(self.ambient, |corners| self.brightness(corners))
    }

    pub fn shade_face(&self, face: &Face, positions: &[Vec3]) -> char {
        ascii_char(self.face_brightness(face, positions))
    }
}

impl Default for ShadingModel {
    fn default() -> Self {
        Self::new(Light::default(), AMBIENT)
    }
}

/// Maps a brightness in `[0, 1]` onto [`ASCII_RAMP`].
pub fn ascii_char(brightness: f32) -> char {
    let index = (brightness * 9.0).floor() as usize;
    ASCII_RAMP[index.min(ASCII_RAMP.len() - 1)]
}
