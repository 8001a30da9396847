//! In-process host that records placements instead of driving a 3D application.
//!
//! Used for layout-only runs, where the exported annotations are replayed by
//! a host-side script, and by tests.

use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::core::error::{AssetKind, Error};
use crate::core::types::{Result, Rgba, Vec2, Vec3};
use super::{AssetLibrary, ObjectHandle, SceneHost};

/// An object as the host would hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedObject {
    /// Unique scene name, `<asset>_<n>`
    pub name: String,
    pub shape_asset: String,
    pub scale: f32,
    pub location: Vec3,
    pub rotation_degrees: f32,
    /// Material asset and color, once assigned
    pub material: Option<(String, Rgba)>,
}

/// Records objects and validates asset names against libraries.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    shapes: AssetLibrary,
    materials: AssetLibrary,
    objects: BTreeMap<ObjectHandle, RecordedObject>,
    /// Next name suffix per shape asset; never reused
    name_counters: BTreeMap<String, usize>,
    next_id: u64,
    deleted: usize,
}

impl RecordingHost {
    pub fn new(shapes: AssetLibrary, materials: AssetLibrary) -> Self {
        Self {
            shapes,
            materials,
            objects: BTreeMap::new(),
            name_counters: BTreeMap::new(),
            next_id: 1,
            deleted: 0,
        }
    }

    /// Host that knows exactly the assets a catalog names.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let shapes = AssetLibrary::from_names(
            AssetKind::Shape,
            catalog.shapes().iter().map(|s| s.asset.clone()),
        );
        let materials = AssetLibrary::from_names(
            AssetKind::Material,
            catalog.materials().iter().map(|m| m.asset.clone()),
        );
        Self::new(shapes, materials)
    }

    pub fn get(&self, object: ObjectHandle) -> Option<&RecordedObject> {
        self.objects.get(&object)
    }

    /// Live objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectHandle, &RecordedObject)> {
        self.objects.iter().map(|(h, o)| (*h, o))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Total number of objects removed so far.
    pub fn deleted_count(&self) -> usize {
        self.deleted
    }

    fn lookup_mut(&mut self, object: ObjectHandle) -> Result<&mut RecordedObject> {
        self.objects.get_mut(&object)
            .ok_or_else(|| Error::Config(format!("unknown object handle {}", object.0)))
    }
}

impl SceneHost for RecordingHost {
    fn add_object(
        &mut self,
        shape_asset: &str,
        scale: f32,
        position: Vec2,
        rotation_degrees: f32,
    ) -> Result<ObjectHandle> {
        self.shapes.require(shape_asset)?;

        let counter = self.name_counters.entry(shape_asset.to_string()).or_insert(0);
        let suffix = *counter;
        *counter += 1;
        let handle = ObjectHandle(self.next_id);
        self.next_id += 1;

        // Unit-size assets are centered on the origin, so lift by the scale to rest on the plane.
        self.objects.insert(handle, RecordedObject {
            name: format!("{}_{}", shape_asset, suffix),
            shape_asset: shape_asset.to_string(),
            scale,
            location: Vec3::new(position.x, position.y, scale),
            rotation_degrees,
            material: None,
        });
        Ok(handle)
    }

    fn add_material(&mut self, object: ObjectHandle, material_asset: &str, color: Rgba) -> Result<()> {
        self.materials.require(material_asset)?;
        let recorded = self.lookup_mut(object)?;
        if recorded.material.is_some() {
            return Err(Error::Config(format!("object {} already has a material", recorded.name)));
        }
        recorded.material = Some((material_asset.to_string(), color));
        Ok(())
    }

    fn object_location(&self, object: ObjectHandle) -> Result<Vec3> {
        self.objects.get(&object)
            .map(|o| o.location)
            .ok_or_else(|| Error::Config(format!("unknown object handle {}", object.0)))
    }

    fn delete_object(&mut self, object: ObjectHandle) -> Result<()> {
        self.objects.remove(&object)
            .ok_or_else(|| Error::Config(format!("unknown object handle {}", object.0)))?;
        self.deleted += 1;
        Ok(())
    }
}
