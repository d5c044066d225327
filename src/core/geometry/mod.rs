mod face;
mod parametric;
mod polyhedra;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use glam::Vec3;

use crate::error::{RenderError, Result};

pub use face::Face;
pub use parametric::{donut, figure8, sphere};
pub use polyhedra::{cube, octahedron, pyramid, tetrahedron};

/// An unordered pair of vertex indices.
pub type Edge = (usize, usize);

/// Vertex, edge and optional face tables for one renderable solid.
///
/// Shapes are built once and never mutated; every frame rotates a copy of
/// `vertices` about `center`.
#[derive(Debug, Clone)]
pub struct Shape {
    name: &'static str,
    center: Vec3,
    vertices: Vec<Vec3>,
    edges: Vec<Edge>,
    faces: Option<Vec<Face>>,
}

impl Shape {
    pub fn new(
        name: &'static str,
        center: Vec3,
        vertices: Vec<Vec3>,
        edges: Vec<Edge>,
        faces: Option<Vec<Face>>,
    ) -> Self {
        Self {
            name,
            center,
            vertices,
            edges,
            faces,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The point the shape rotates about.
    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// `None` for wireframe-only shapes.
    pub fn faces(&self) -> Option<&[Face]> {
        self.faces.as_deref()
    }

    pub fn has_faces(&self) -> bool {
        self.faces.is_some()
    }

    /// Checks that every edge and face refers to existing vertices and that
    /// every face is at least a triangle.
    pub fn validate(&self) -> Result<()> {
        let count = self.vertices.len();
        let malformed = |reason: String| RenderError::MalformedShape {
            shape: self.name,
            reason,
        };

        for (i, &(a, b)) in self.edges.iter().enumerate() {
            if a >= count || b >= count {
                return Err(malformed(format!(
                    "edge {i} ({a}, {b}) is out of range for {count} vertices"
                )));
            }
        }

        for (i, face) in self.faces().unwrap_or_default().iter().enumerate() {
            if face.vertices.len() < 3 {
                return Err(malformed(format!(
                    "face {i} has only {} corners",
                    face.vertices.len()
                )));
            }
            if let Some(&bad) = face.vertices.iter().find(|&&v| v >= count) {
                return Err(malformed(format!(
                    "face {i} refers to vertex {bad} of {count}"
                )));
            }
        }

        Ok(())
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} vertices, {} edges, {} faces",
            self.name,
            self.vertices.len(),
            self.edges.len(),
            self.faces().map_or(0, <[Face]>::len)
        )
    }
}

/// The shapes the renderer knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Cube,
    Donut,
    Figure8,
    Pyramid,
    Sphere,
    Tetrahedron,
    Octahedron,
}

impl ShapeKind {
    /// Accepted `--shape` values.
    pub const NAMES: [&'static str; 7] = [
        "cube",
        "donut",
        "figure8",
        "pyramid",
        "sphere",
        "tetrahedron",
        "octahedron",
    ];

    /// Screensaver order.
    pub const CYCLE: [ShapeKind; 7] = [
        ShapeKind::Cube,
        ShapeKind::Pyramid,
        ShapeKind::Tetrahedron,
        ShapeKind::Octahedron,
        ShapeKind::Sphere,
        ShapeKind::Donut,
        ShapeKind::Figure8,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Cube => "cube",
            ShapeKind::Donut => "donut",
            ShapeKind::Figure8 => "figure8",
            ShapeKind::Pyramid => "pyramid",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Tetrahedron => "tetrahedron",
            ShapeKind::Octahedron => "octahedron",
        }
    }

    /// Whether the built shape carries a face table (solid mode support).
    pub fn has_faces(self) -> bool {
        matches!(
            self,
            ShapeKind::Cube | ShapeKind::Sphere | ShapeKind::Donut | ShapeKind::Figure8
        )
    }

    /// Builds the shape with the sizes used for an 80x40 canvas.
    pub fn build(self) -> Shape {
        match self {
            ShapeKind::Cube => cube(Vec3::ZERO, 5.0),
            ShapeKind::Pyramid => pyramid(Vec3::ZERO, 5.0),
            ShapeKind::Tetrahedron => tetrahedron(Vec3::ZERO, 3.0),
            ShapeKind::Octahedron => octahedron(Vec3::ZERO, 6.0),
            ShapeKind::Sphere => sphere(Vec3::ZERO, 3.0, 12, 12),
            ShapeKind::Donut => donut(3.0, 1.0, 10),
            ShapeKind::Figure8 => figure8(Vec3::ZERO, 10.0, 16),
        }
    }
}

impl Display for ShapeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cube" => Ok(ShapeKind::Cube),
            "donut" => Ok(ShapeKind::Donut),
            "figure8" => Ok(ShapeKind::Figure8),
            "pyramid" => Ok(ShapeKind::Pyramid),
            "sphere" => Ok(ShapeKind::Sphere),
            "tetrahedron" => Ok(ShapeKind::Tetrahedron),
            "octahedron" => Ok(ShapeKind::Octahedron),
            other => Err(RenderError::UnknownShape(other.to_string())),
        }
    }
}
