//! Object property catalogs: shapes, colors, materials, and sizes.
//!
//! Catalogs are read once from a `properties.json` file and stay immutable
//! for the rest of the run. The file maps host asset names to display names
//! for shapes and materials, color names to 0-255 RGB triples, and size names
//! to ground-plane radii.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{AssetKind, Error};
use crate::core::types::{Result, Rgba};

/// Default catalog shipped with the crate.
const BUILTIN_PROPERTIES: &str = include_str!("../../data/properties.json");

/// On-disk layout of a properties file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesFile {
    pub colors: BTreeMap<String, [u8; 3]>,
    pub materials: BTreeMap<String, String>,
    pub shapes: BTreeMap<String, String>,
    pub sizes: BTreeMap<String, f32>,
}

/// A named color converted to normalized RGBA.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpec {
    pub name: String,
    pub rgba: Rgba,
}

/// A shape asset and the name it is annotated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSpec {
    pub asset: String,
    pub name: String,
}

impl ShapeSpec {
    /// Cubes get their footprint radius shrunk so the diagonal matches.
    pub fn is_cube(&self) -> bool {
        self.asset.eq_ignore_ascii_case("cube")
    }
}

/// A material node group and the name it is annotated with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialSpec {
    pub asset: String,
    pub name: String,
}

/// A size class and its ground-plane radius.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeSpec {
    pub name: String,
    pub radius: f32,
}

/// Immutable lookup tables for one generation run.
#[derive(Debug, Clone)]
pub struct Catalog {
    colors: Vec<ColorSpec>,
    materials: Vec<MaterialSpec>,
    shapes: Vec<ShapeSpec>,
    sizes: Vec<SizeSpec>,
}

impl Catalog {
    /// Build and validate a catalog from a parsed properties file.
    pub fn from_properties(props: PropertiesFile) -> Result<Self> {
        let colors = props.colors.into_iter()
            .map(|(name, rgb)| ColorSpec { name, rgba: rgb_to_rgba(rgb) })
            .collect();
        let materials = props.materials.into_iter()
            .map(|(asset, name)| MaterialSpec { asset, name })
            .collect();
        let shapes = props.shapes.into_iter()
            .map(|(asset, name)| ShapeSpec { asset, name })
            .collect();
        let sizes = props.sizes.into_iter()
            .map(|(name, radius)| SizeSpec { name, radius })
            .collect();

        let catalog = Self { colors, materials, shapes, sizes };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let props: PropertiesFile = serde_json::from_str(json)?;
        Self::from_properties(props)
    }

    /// Load a catalog from a properties file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        log::debug!(
            "Loaded catalog from {}: {} shapes, {} colors, {} materials, {} sizes",
            path.display(),
            catalog.shapes.len(),
            catalog.colors.len(),
            catalog.materials.len(),
            catalog.sizes.len(),
        );
        Ok(catalog)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(BUILTIN_PROPERTIES)
    }

    fn validate(&self) -> Result<()> {
        let empty = [
            ("colors", self.colors.is_empty()),
            ("materials", self.materials.is_empty()),
            ("shapes", self.shapes.is_empty()),
            ("sizes", self.sizes.is_empty()),
        ];
        if let Some((name, _)) = empty.iter().find(|(_, is_empty)| *is_empty) {
            return Err(Error::Config(format!("catalog has no {}", name)));
        }
        if let Some(size) = self.sizes.iter().find(|s| !(s.radius > 0.0) || !s.radius.is_finite()) {
            return Err(Error::Config(format!(
                "size '{}' has non-positive radius {}", size.name, size.radius
            )));
        }
        Ok(())
    }

    pub fn colors(&self) -> &[ColorSpec] {
        &self.colors
    }

    pub fn materials(&self) -> &[MaterialSpec] {
        &self.materials
    }

    pub fn shapes(&self) -> &[ShapeSpec] {
        &self.shapes
    }

    pub fn sizes(&self) -> &[SizeSpec] {
        &self.sizes
    }

    /// Look up a shape by host asset name.
    pub fn shape(&self, asset: &str) -> Result<&ShapeSpec> {
        self.shapes.iter()
            .find(|s| s.asset == asset)
            .ok_or_else(|| Error::AssetNotFound { kind: AssetKind::Shape, name: asset.to_string() })
    }

    /// Look up a material by host asset name.
    pub fn material(&self, asset: &str) -> Result<&MaterialSpec> {
        self.materials.iter()
            .find(|m| m.asset == asset)
            .ok_or_else(|| Error::AssetNotFound { kind: AssetKind::Material, name: asset.to_string() })
    }

    pub fn color(&self, name: &str) -> Option<&ColorSpec> {
        self.colors.iter().find(|c| c.name == name)
    }

    pub fn size(&self, name: &str) -> Option<&SizeSpec> {
        self.sizes.iter().find(|s| s.name == name)
    }
}

/// Convert a 0-255 RGB triple to normalized RGBA with full alpha.
pub fn rgb_to_rgba(rgb: [u8; 3]) -> Rgba {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        1.0,
    ]
}
