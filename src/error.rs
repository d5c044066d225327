use std::io;

/// Everything that can stop a render session.
///
/// Numeric trouble inside a frame (zero-length normals, points projected to
/// infinity) is not represented here: the shading model and the rasterizer
/// absorb it.
#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("unknown shape: {0:?}")]
    UnknownShape(String),
    #[error("shape {shape:?} has no faces and cannot be rendered in solid mode")]
    MissingFaces { shape: &'static str },
    #[error("shape {shape:?} is malformed: {reason}")]
    MalformedShape { shape: &'static str, reason: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
