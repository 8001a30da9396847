//! Flat-render visibility check.
//!
//! Objects are rendered unlit with a distinct solid color each, so counting
//! pixels per exact color measures how much of every object is visible.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use image::RgbaImage;
use rand::Rng;

use crate::core::types::{Result, Rgba};

/// Pixel counts of a flat render against the expected object count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityReport {
    /// Objects plus background
    pub expected_colors: usize,
    pub min_pixels: u32,
    /// Distinct colors and their pixel counts, largest first
    pub color_counts: Vec<([u8; 4], u32)>,
}

impl VisibilityReport {
    /// Exactly one color per object plus the background, each large enough.
    pub fn is_visible(&self) -> bool {
        self.color_counts.len() == self.expected_colors
            && self.color_counts.iter().all(|&(_, count)| count >= self.min_pixels)
    }

    pub fn distinct_colors(&self) -> usize {
        self.color_counts.len()
    }

    /// Smallest pixel count of any color.
    pub fn smallest_count(&self) -> Option<u32> {
        self.color_counts.iter().map(|&(_, count)| count).min()
    }
}

/// Histogram of exact RGBA values.
pub fn count_colors(image: &RgbaImage) -> HashMap<[u8; 4], u32> {
    let mut counts = HashMap::new();
    for pixel in image.pixels() {
        *counts.entry(pixel.0).or_insert(0) += 1;
    }
    counts
}

/// Check a flat render of `object_count` objects.
pub fn check_visibility(image: &RgbaImage, object_count: usize, min_pixels: u32) -> VisibilityReport {
    let mut color_counts: Vec<([u8; 4], u32)> = count_colors(image).into_iter().collect();
    color_counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    VisibilityReport {
        expected_colors: object_count + 1,
        min_pixels,
        color_counts,
    }
}

/// Load a flat render from disk and check it.
pub fn check_visibility_file(path: &Path, object_count: usize, min_pixels: u32) -> Result<VisibilityReport> {
    let image = image::open(path)?.to_rgba8();
    Ok(check_visibility(&image, object_count, min_pixels))
}

/// `n` distinct opaque colors for the flat pass.
///
/// Colors are distinct after 8-bit quantization and avoid pure black and
/// pure white, which the background may use.
pub fn flat_palette<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Rgba> {
    let mut seen: HashSet<[u8; 3]> = HashSet::from([[0, 0, 0], [255, 255, 255]]);
    let mut palette = Vec::with_capacity(n);

    while palette.len() < n {
        let rgb: [u8; 3] = [rng.gen_range(0..=255), rng.gen_range(0..=255), rng.gen_range(0..=255)];
        if seen.insert(rgb) {
            palette.push(crate::catalog::rgb_to_rgba(rgb));
        }
    }

    palette
}
