//! Ground-truth annotation records written next to the rendered images

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::types::Result;
use crate::generation::relationships::RelationshipTable;
use super::directions::Direction;
use super::object::PlacedObject;
use super::setup::SceneSetup;
use super::state::Scene;

/// Annotation format version
pub const EXPORT_VERSION: &str = "1.0";

/// Annotated attributes of one object.
///
/// The first block is the dataset annotation; the rest is what a host-side
/// script needs to rebuild the object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub shape: String,
    pub size: String,
    pub material: String,
    pub color: String,
    #[serde(rename = "3d_coords")]
    pub coords: [f32; 3],
    pub rotation: f32,
    /// (x, y, depth)
    pub pixel_coords: (i32, i32, f32),

    pub shape_asset: String,
    pub material_asset: String,
    pub rgba: [f32; 4],
    pub radius: f32,
    pub position: [f32; 2],
}

impl From<&PlacedObject> for ObjectRecord {
    fn from(object: &PlacedObject) -> Self {
        Self {
            shape: object.shape.clone(),
            size: object.size.clone(),
            material: object.material.clone(),
            color: object.color.clone(),
            coords: object.coords.to_array(),
            rotation: object.rotation,
            pixel_coords: (object.pixel_coords.x, object.pixel_coords.y, object.pixel_coords.depth),
            shape_asset: object.shape_asset.clone(),
            material_asset: object.material_asset.clone(),
            rgba: object.rgba,
            radius: object.radius,
            position: object.position.to_array(),
        }
    }
}

/// Annotation of one rendered image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub split: String,
    pub image_index: usize,
    pub image_filename: Option<String>,
    pub objects: Vec<ObjectRecord>,
    pub directions: BTreeMap<Direction, [f32; 3]>,
    pub relationships: RelationshipTable,
}

impl SceneRecord {
    pub fn new(scene: &Scene, relationships: RelationshipTable) -> Self {
        Self {
            split: scene.split.clone(),
            image_index: scene.image_index,
            image_filename: scene.image_filename.clone(),
            objects: scene.objects().iter().map(ObjectRecord::from).collect(),
            directions: scene.directions.to_map(),
            relationships,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

/// Run-level metadata of a scene collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub split: String,
    pub version: String,
    pub seed: u64,
    pub setup: SceneSetup,
}

/// Every scene of one run, plus the setup they share.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCollection {
    pub info: CollectionInfo,
    pub scenes: Vec<SceneRecord>,
}

impl SceneCollection {
    pub fn new(split: impl Into<String>, seed: u64, setup: SceneSetup) -> Self {
        Self {
            info: CollectionInfo {
                split: split.into(),
                version: EXPORT_VERSION.to_string(),
                seed,
                setup,
            },
            scenes: Vec::new(),
        }
    }

    pub fn push(&mut self, record: SceneRecord) {
        self.scenes.push(record);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        save_json(self, path)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

fn save_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, json)?;
    Ok(())
}
