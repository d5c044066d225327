use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use glam::{Vec2, Vec3};

use crate::error::RenderError;

/// Maps rotated world points onto real-valued canvas coordinates.
///
/// Rounding to cells happens later, in the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Drops z: `x' = x * scale + offset.x`, `y' = -(y * scale + offset.y)`.
    Orthographic { scale: f32, offset: Vec2 },
    /// `factor = fov / (viewer_distance + z)`, centered on the canvas.
    ///
    /// A point at `z == -viewer_distance` lands at infinity; the rasterizer
    /// drops non-finite coordinates.
    Perspective { fov: f32, viewer_distance: f32 },
}

impl Projection {
    pub const DEFAULT_SCALE: f32 = 4.0;
    pub const DEFAULT_OFFSET: Vec2 = Vec2::new(20.0, -20.0);
    pub const DEFAULT_FOV: f32 = 200.0;
    pub const DEFAULT_VIEWER_DISTANCE: f32 = 45.0;

    pub fn orthographic() -> Self {
        Projection::Orthographic {
            scale: Self::DEFAULT_SCALE,
            offset: Self::DEFAULT_OFFSET,
        }
    }

    /// Orthographic projection with the origin landing in the middle of a
    /// `width` x `height` canvas.
    pub fn orthographic_centered(width: usize, height: usize) -> Self {
        Projection::Orthographic {
            scale: Self::DEFAULT_SCALE,
            offset: Vec2::new(width as f32 / 2.0, -(height as f32) / 2.0),
        }
    }

    pub fn perspective() -> Self {
        Projection::Perspective {
            fov: Self::DEFAULT_FOV,
            viewer_distance: Self::DEFAULT_VIEWER_DISTANCE,
        }
    }

    pub fn project(&self, v: Vec3, width: usize, height: usize) -> Vec2 {
        match *self {
            Projection::Orthographic { scale, offset } => {
                Vec2::new(v.x * scale + offset.x, -(v.y * scale + offset.y))
            }
            Projection::Perspective {
                fov,
                viewer_distance,
            } => {
                let factor = fov / (viewer_distance + v.z);
                Vec2::new(
                    v.x * factor + width as f32 / 2.0,
                    -v.y * factor + height as f32 / 2.0,
                )
            }
        }
    }

    /// Projects a whole vertex buffer into `out`, reusing its allocation.
    pub fn project_all(
        &self,
        vertices: &[Vec3],
        width: usize,
        height: usize,
        out: &mut Vec<Vec2>,
    ) {
        out.clear();
        out.extend(vertices.iter().map(|&v| self.project(v, width, height)));
    }
}

/// The `--projection` choice: `o` or `p`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    Orthographic,
    #[default]
    Perspective,
}

impl ProjectionKind {
    pub const NAMES: [&'static str; 2] = ["o", "p"];

    /// The concrete projection the frame driver uses for a canvas of this size.
    pub fn for_canvas(self, width: usize, height: usize) -> Projection {
        match self {
            ProjectionKind::Orthographic => Projection::orthographic_centered(width, height),
            ProjectionKind::Perspective => Projection::perspective(),
        }
    }
}

impl Display for ProjectionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKind::Orthographic => write!(f, "orthographic"),
            ProjectionKind::Perspective => write!(f, "perspective"),
        }
    }
}

impl FromStr for ProjectionKind {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o" => Ok(ProjectionKind::Orthographic),
            "p" => Ok(ProjectionKind::Perspective),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown projection {other:?}, expected 'o' or 'p'"
            ))),
        }
    }
}
