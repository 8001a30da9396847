//! Perspective camera matching the host application's camera model

use crate::core::types::{Vec3, Quat};
use crate::math::projection::CameraView;

/// Default full-frame sensor width in millimeters.
pub const DEFAULT_SENSOR_WIDTH: f32 = 36.0;

/// Perspective camera with position, rotation, and lens parameters.
///
/// Camera-local axes follow the host convention: the camera looks down -Z,
/// +X points right and +Y points up in the image.
#[derive(Clone, Debug)]
pub struct Camera {
    /// World position
    pub position: Vec3,
    /// Rotation as quaternion
    pub rotation: Quat,
    /// Focal length in millimeters
    pub lens: f32,
    /// Sensor width in millimeters (sensor fit is automatic)
    pub sensor_width: f32,
    /// Horizontal lens shift, in units of the larger frame dimension
    pub shift_x: f32,
    /// Vertical lens shift, in units of the larger frame dimension
    pub shift_y: f32,
    /// Aspect ratio (width / height, pixel aspect included)
    pub aspect: f32,
}

impl Camera {
    /// Create a new camera
    pub fn new(position: Vec3, rotation: Quat, lens: f32) -> Self {
        Self {
            position,
            rotation,
            lens,
            sensor_width: DEFAULT_SENSOR_WIDTH,
            shift_x: 0.0,
            shift_y: 0.0,
            aspect: 1.0,
        }
    }

    /// Create a camera from an XYZ Euler rotation in radians.
    ///
    /// The host applies X first, then Y, then Z about the world axes.
    pub fn from_euler_xyz(position: Vec3, euler: Vec3, lens: f32) -> Self {
        Self::new(position, euler_xyz_to_quat(euler), lens)
    }

    /// Transform a world point into camera-local space.
    pub fn to_local(&self, point: Vec3) -> Vec3 {
        self.rotation.conjugate() * (point - self.position)
    }

    /// Half width and half height of the view frame at unit depth.
    pub fn frame_half_extents(&self) -> (f32, f32) {
        let half_sensor = self.sensor_width / (2.0 * self.lens);
        if self.aspect >= 1.0 {
            (half_sensor, half_sensor / self.aspect)
        } else {
            (half_sensor * self.aspect, half_sensor)
        }
    }
}

impl CameraView for Camera {
    fn world_to_camera_view(&self, point: Vec3) -> Vec3 {
        let local = self.to_local(point);
        let depth = -local.z;
        if depth == 0.0 {
            return Vec3::new(0.5, 0.5, 0.0);
        }

        let (half_w, half_h) = self.frame_half_extents();
        let larger = 2.0 * half_w.max(half_h);
        let center_x = self.shift_x * larger;
        let center_y = self.shift_y * larger;

        // Frame edges scale with depth; a point behind the camera flips through.
        let x = (local.x / depth - (center_x - half_w)) / (2.0 * half_w);
        let y = (local.y / depth - (center_y - half_h)) / (2.0 * half_h);
        Vec3::new(x, y, depth)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY, 35.0)
    }
}

/// Compose an XYZ Euler rotation the way the host stores object rotations.
pub fn euler_xyz_to_quat(euler: Vec3) -> Quat {
    Quat::from_rotation_z(euler.z) * Quat::from_rotation_y(euler.y) * Quat::from_rotation_x(euler.x)
}
