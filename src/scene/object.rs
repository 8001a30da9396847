//! Placed object records

use crate::core::types::{Rgba, Vec2, Vec3};
use crate::host::ObjectHandle;
use crate::math::PixelCoords;

/// One object placed on the ground plane, with everything annotated about it.
///
/// Built by the placement engine and never modified afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedObject {
    /// Host handle of the instantiated object
    pub handle: ObjectHandle,
    /// Shape display name and host asset
    pub shape: String,
    pub shape_asset: String,
    /// Size class name
    pub size: String,
    /// Material display name and host asset
    pub material: String,
    pub material_asset: String,
    /// Color name and its RGBA value
    pub color: String,
    pub rgba: Rgba,
    /// Ground-plane position
    pub position: Vec2,
    /// Footprint radius after the shape adjustment
    pub radius: f32,
    /// Rotation about the vertical axis in degrees, in [0, 360)
    pub rotation: f32,
    /// World position as reported by the host
    pub coords: Vec3,
    pub pixel_coords: PixelCoords,
}
