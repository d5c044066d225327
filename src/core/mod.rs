pub mod geometry;
pub mod light;
pub mod projection;
pub mod transform;
