//! Shapegen - procedural layout and annotation of synthetic 3D shape scenes

pub mod core;
pub mod math;
pub mod catalog;
pub mod scene;
pub mod host;
pub mod generation;
