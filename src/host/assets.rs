//! Host asset directories.
//!
//! An asset directory holds one `<name>.blend` file per shape or material,
//! each containing a single object or node group called `<name>`.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::core::error::{AssetKind, Error};
use crate::core::types::Result;

/// File extension of host asset files
pub const ASSET_FILE_EXTENSION: &str = "blend";

/// Index of the assets available in one directory.
#[derive(Debug, Clone)]
pub struct AssetLibrary {
    kind: AssetKind,
    base_dir: PathBuf,
    names: BTreeSet<String>,
}

impl AssetLibrary {
    /// Scan a directory for asset files.
    pub fn open(kind: AssetKind, base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let mut names = BTreeSet::new();

        for entry in std::fs::read_dir(&base_dir)? {
            let path = entry?.path();
            let is_asset = path.extension().and_then(|e| e.to_str()) == Some(ASSET_FILE_EXTENSION);
            if !is_asset {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }

        log::debug!("{} library {}: {} assets", kind, base_dir.display(), names.len());
        Ok(Self { kind, base_dir, names })
    }

    /// Library over a fixed set of names with no backing directory.
    pub fn from_names<I, S>(kind: AssetKind, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind,
            base_dir: PathBuf::new(),
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Path of the asset file, or `AssetNotFound`.
    pub fn require(&self, name: &str) -> Result<PathBuf> {
        if !self.contains(name) {
            return Err(Error::AssetNotFound { kind: self.kind, name: name.to_string() });
        }
        Ok(self.base_dir.join(format!("{}.{}", name, ASSET_FILE_EXTENSION)))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_directory() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        for name in ["Cube.blend", "Sphere.blend", "notes.txt"] {
            std::fs::write(temp_dir.path().join(name), b"").unwrap();
        }

        let library = AssetLibrary::open(AssetKind::Shape, temp_dir.path()).expect("open failed");
        assert_eq!(library.len(), 2);
        assert!(library.contains("Cube"));
        assert!(!library.contains("notes"));
        assert_eq!(library.require("Sphere").unwrap(), temp_dir.path().join("Sphere.blend"));
    }

    #[test]
    fn test_missing_asset() {
        let library = AssetLibrary::from_names(AssetKind::Material, ["Rubber"]);
        let err = library.require("Glass").unwrap_err();
        assert!(matches!(err, Error::AssetNotFound { kind: AssetKind::Material, .. }));
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let result = AssetLibrary::open(AssetKind::Shape, temp_dir.path().join("absent"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
