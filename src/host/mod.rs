//! Collaborator seams into the host 3D application.
//!
//! The generator never touches host state directly: it instantiates assets,
//! assigns materials, and renders through these traits, passing explicit
//! object handles around.

pub mod assets;
pub mod recording;

pub use assets::AssetLibrary;
pub use recording::{RecordedObject, RecordingHost};

use std::path::Path;

use crate::core::types::{Result, Rgba, Vec2, Vec3};

/// Host-side identifier of an instantiated object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(pub u64);

/// Asset placement and material assignment in the host scene.
pub trait SceneHost {
    /// Instantiate a unit-size, origin-centered shape asset.
    ///
    /// The object is scaled by `scale`, rests on the ground plane at
    /// `position`, and is rotated `rotation_degrees` about the vertical axis.
    fn add_object(
        &mut self,
        shape_asset: &str,
        scale: f32,
        position: Vec2,
        rotation_degrees: f32,
    ) -> Result<ObjectHandle>;

    /// Create a material from a named node group and attach it to `object`.
    fn add_material(&mut self, object: ObjectHandle, material_asset: &str, color: Rgba) -> Result<()>;

    /// World location of an instantiated object.
    fn object_location(&self, object: ObjectHandle) -> Result<Vec3>;

    /// Remove an object from the host scene.
    fn delete_object(&mut self, object: ObjectHandle) -> Result<()>;

    /// Rendering access, for hosts that can render.
    fn renderer(&mut self) -> Option<&mut dyn Renderer> {
        None
    }
}

/// Produces raster images of the current host scene.
pub trait Renderer {
    /// Full shaded render written to `output`.
    fn render(&mut self, output: &Path) -> Result<()>;

    /// Unlit, un-antialiased render with lights and ground hidden and each
    /// listed object painted a single solid color.
    fn render_flat(&mut self, output: &Path, colors: &[(ObjectHandle, Rgba)]) -> Result<()>;
}
