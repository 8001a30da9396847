//! Geometry helpers: camera projection and plane-relative axes

pub mod projection;
pub mod plane;

pub use projection::{CameraView, PixelCoords, project_to_camera};
pub use plane::{plane_relative_axis, normal_aligned_axis};
