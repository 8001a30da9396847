//! Error types for scene generation

use thiserror::Error;

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{kind} asset not found: {name}")]
    AssetNotFound { kind: AssetKind, name: String },

    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("Gave up after {restarts} restarts: {reason}")]
    RestartLimit { restarts: u32, reason: String },
}

/// What kind of host asset a lookup was for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Shape,
    Material,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Shape => write!(f, "Shape"),
            AssetKind::Material => write!(f, "Material"),
        }
    }
}
