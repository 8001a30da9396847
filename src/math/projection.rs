//! World to pixel projection

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;

/// Maps world points into normalized camera view coordinates.
///
/// `x` and `y` are in [0, 1] for points inside the frame (origin at the
/// bottom-left), `z` is the depth along the camera's viewing axis.
pub trait CameraView {
    fn world_to_camera_view(&self, point: Vec3) -> Vec3;
}

/// Pixel position of a projected point. Row 0 is the top of the image.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelCoords {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
}

/// Project a world point to pixel coordinates plus depth.
///
/// Points outside the frame are not clamped and land outside
/// `[0, width) x [0, height)`.
pub fn project_to_camera<C: CameraView + ?Sized>(
    camera: &C,
    width: u32,
    height: u32,
    point: Vec3,
) -> PixelCoords {
    let view = camera.world_to_camera_view(point);
    let w = width as f32;
    let h = height as f32;
    PixelCoords {
        x: (view.x * w).round_ties_even() as i32,
        y: (h - view.y * h).round_ties_even() as i32,
        depth: view.z,
    }
}
