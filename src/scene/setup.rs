//! Fixed scene setup: render settings, camera, ground plane, and lights.
//!
//! Everything here is configured once per run and shared by every image.
//! Defaults reproduce the standard three-light studio used by the dataset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::camera::Camera;
use crate::core::types::{Resolution, Result, Vec3};
use super::directions::DirectionFrame;

/// Render engine settings handed to the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub engine: String,
    pub resolution_x: u32,
    pub resolution_y: u32,
    /// Percentage scale applied to the resolution
    pub resolution_percentage: u32,
    pub pixel_aspect_x: f32,
    pub pixel_aspect_y: f32,
    pub samples: u32,
    pub blur_glossy: f32,
    pub transparent_min_bounces: u32,
    pub transparent_max_bounces: u32,
    /// Sample the world background as a light source
    pub sample_world_as_light: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            engine: "CYCLES".to_string(),
            resolution_x: 320,
            resolution_y: 320,
            resolution_percentage: 100,
            pixel_aspect_x: 4.6,
            pixel_aspect_y: 4.6,
            samples: 512,
            blur_glossy: 2.0,
            transparent_min_bounces: 8,
            transparent_max_bounces: 8,
            sample_world_as_light: true,
        }
    }
}

impl RenderSettings {
    /// Output resolution after the percentage scale (truncated, as the host does).
    pub fn resolution(&self) -> Resolution {
        let scale = self.resolution_percentage as f32 / 100.0;
        Resolution::new(
            (scale * self.resolution_x as f32) as u32,
            (scale * self.resolution_y as f32) as u32,
        )
    }

    /// Frame aspect ratio with pixel aspect applied.
    pub fn frame_aspect(&self) -> f32 {
        let res = self.resolution();
        (res.width as f32 * self.pixel_aspect_x) / (res.height.max(1) as f32 * self.pixel_aspect_y)
    }
}

/// Camera placement and lens.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub location: [f32; 3],
    /// XYZ Euler rotation in radians
    pub rotation_euler: [f32; 3],
    /// Focal length in millimeters
    pub lens: f32,
    pub sensor_width: f32,
    pub shift_x: f32,
    pub shift_y: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            location: [5.62, -5.77, 4.44],
            rotation_euler: [0.75, 0.01, 0.82],
            lens: 35.0,
            sensor_width: crate::core::camera::DEFAULT_SENSOR_WIDTH,
            shift_x: 0.0,
            shift_y: 0.22,
        }
    }
}

/// The square ground plane objects are placed on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundPlane {
    pub size: f32,
    pub normal: [f32; 3],
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self { size: 8.0, normal: [0.0, 0.0, 1.0] }
    }
}

/// Area light.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaLight {
    pub name: String,
    pub energy: f32,
    pub size: f32,
    pub color: [f32; 3],
    pub location: [f32; 3],
    pub rotation_euler: [f32; 3],
}

fn default_lights() -> Vec<AreaLight> {
    vec![
        // Back
        AreaLight {
            name: "ambient_light_1".to_string(),
            energy: 50.0,
            size: 1.0,
            color: [1.0, 1.0, 1.0],
            location: [-1.17, 2.65, 5.82],
            rotation_euler: [-0.40, -0.17, -0.03],
        },
        // Fill
        AreaLight {
            name: "ambient_light_2".to_string(),
            energy: 30.0,
            size: 0.5,
            color: [0.762, 0.818, 1.0],
            location: [-4.67, -4.01, 3.01],
            rotation_euler: [1.03, -0.53, -0.56],
        },
        // Key
        AreaLight {
            name: "ambient_light_3".to_string(),
            energy: 100.0,
            size: 0.5,
            color: [1.0, 0.932, 0.817],
            location: [6.45, -2.91, 4.26],
            rotation_euler: [-0.225, 1.002, -0.664],
        },
    ]
}

/// Full fixed setup of the studio scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSetup {
    pub render: RenderSettings,
    pub camera: CameraSettings,
    pub ground: GroundPlane,
    pub lights: Vec<AreaLight>,
}

impl Default for SceneSetup {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            camera: CameraSettings::default(),
            ground: GroundPlane::default(),
            lights: default_lights(),
        }
    }
}

impl SceneSetup {
    /// Load a setup from JSON; missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn resolution(&self) -> Resolution {
        self.render.resolution()
    }

    /// Camera with aspect taken from the render settings.
    pub fn camera(&self) -> Camera {
        let settings = &self.camera;
        let mut camera = Camera::from_euler_xyz(
            Vec3::from_array(settings.location),
            Vec3::from_array(settings.rotation_euler),
            settings.lens,
        );
        camera.sensor_width = settings.sensor_width;
        camera.shift_x = settings.shift_x;
        camera.shift_y = settings.shift_y;
        camera.aspect = self.render.frame_aspect();
        camera
    }

    /// Direction frame seen from the configured camera.
    pub fn direction_frame(&self) -> Result<DirectionFrame> {
        DirectionFrame::from_camera(self.camera().rotation, Vec3::from_array(self.ground.normal))
    }
}
