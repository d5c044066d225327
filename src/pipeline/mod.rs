use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use glam::{Vec2, Vec3};
use log::trace;

use crate::core::geometry::Shape;
use crate::core::light::ShadingModel;
use crate::core::projection::Projection;
use crate::core::transform::RotationState;
use crate::error::{RenderError, Result};

pub mod buffer;
pub mod rasterizer;

pub use buffer::Canvas;

/// Character used for wireframe edges.
pub const LINE_CHAR: char = '&';

/// How a shape is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Every edge as a line.
    #[default]
    Wireframe,
    /// Every face filled with its shading character.
    Solid,
}

impl RenderMode {
    pub const NAMES: [&'static str; 2] = ["wireframe", "solid"];
}

impl Display for RenderMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Wireframe => write!(f, "wireframe"),
            RenderMode::Solid => write!(f, "solid"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "wireframe" => Ok(RenderMode::Wireframe),
            "solid" => Ok(RenderMode::Solid),
            other => Err(RenderError::InvalidConfig(format!(
                "unknown render mode {other:?}"
            ))),
        }
    }
}

/// Rotate → project → rasterize for one shape per frame.
///
/// The pipeline keeps its intermediate vertex buffers between frames so a
/// running animation does not allocate; it never holds on to the shape or the
/// canvas.
pub struct Pipeline {
    projection: Projection,
    mode: RenderMode,
    shading: ShadingModel,
    rotated: Vec<Vec3>,
    projected: Vec<Vec2>,
    polygon: Vec<Vec2>,
}

impl Pipeline {
    pub fn new(projection: Projection, mode: RenderMode, shading: ShadingModel) -> Self {
        Self {
            projection,
            mode,
            shading,
            rotated: Vec::with_capacity(256),
            projected: Vec::with_capacity(256),
            polygon: Vec::with_capacity(32),
        }
    }

    /// Rotated positions from the last [`Pipeline::process_geometry`] call.
    pub fn rotated(&self) -> &[Vec3] {
        &self.rotated
    }

    /// Projected positions from the last [`Pipeline::process_geometry`] call.
    pub fn projected(&self) -> &[Vec2] {
        &self.projected
    }

    /// Fails when the current mode cannot draw `shape`.
    pub fn check_shape(&self, shape: &Shape) -> Result<()> {
        if self.mode == RenderMode::Solid && !shape.has_faces() {
            return Err(RenderError::MissingFaces {
                shape: shape.name(),
            });
        }
        Ok(())
    }

    /// Draws `shape` at `rotation` into `canvas`. The canvas is not cleared.
    pub fn render(
        &mut self,
        shape: &Shape,
        rotation: &RotationState,
        canvas: &mut Canvas,
    ) -> Result<()> {
        self.check_shape(shape)?;
        self.process_geometry(shape, rotation, canvas.width(), canvas.height());
        self.rasterize(shape, canvas);
        Ok(())
    }

    /// Rotates every vertex about the shape center, then projects it.
    pub fn process_geometry(
        &mut self,
        shape: &Shape,
        rotation: &RotationState,
        width: usize,
        height: usize,
    ) {
        rotation.apply_all(shape.vertices(), shape.center(), &mut self.rotated);
        self.projection
            .project_all(&self.rotated, width, height, &mut self.projected);
    }

    fn rasterize(&mut self, shape: &Shape, canvas: &mut Canvas) {
        match (self.mode, shape.faces()) {
            (RenderMode::Solid, Some(faces)) => {
                trace!("filling {} faces of {}", faces.len(), shape.name());
                for face in faces {
                    let ch = self.shading.shade_face(face, &self.rotated);
                    self.polygon.clear();
                    self.polygon
                        .extend(face.vertices.iter().map(|&i| self.projected[i]));
                    rasterizer::fill_polygon(canvas, &self.polygon, ch);
                }
            }
            _ => {
                trace!("drawing {} edges of {}", shape.edges().len(), shape.name());
                for &(a, b) in shape.edges() {
                    rasterizer::draw_line(
                        canvas,
                        self.projected[a],
                        self.projected[b],
                        LINE_CHAR,
                    );
                }
            }
        }
    }
}
