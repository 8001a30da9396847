//! Scene generation pipeline.
//!
//! For each image the generator:
//! 1. Places objects under the clearance and margin constraints
//! 2. Renders a flat pass and checks every object is visible (when the host can render)
//! 3. Renders the final image
//! 4. Computes pairwise relationships and builds the annotation record
//!
//! Failed placement batches and failed visibility checks both restart the
//! whole batch, drawing from one restart budget per image.

pub mod config;
pub mod placement;
pub mod relationships;
pub mod visibility;

pub use config::{GenerationConfig, PlacementConfig, RestartBudget, RestartPolicy, VisibilityConfig};
pub use placement::{PlacementContext, PlacementEngine};
pub use relationships::{RelationshipTable, compute_relationships};
pub use visibility::{VisibilityReport, check_visibility};

use std::path::Path;

use crate::core::types::{Result, Rgba};
use crate::host::{ObjectHandle, SceneHost};
use crate::scene::{Scene, SceneRecord};

/// Orchestrates per-image generation: placement → visibility → render → annotations.
pub struct SceneGenerator {
    config: GenerationConfig,
    engine: PlacementEngine,
}

impl SceneGenerator {
    /// Create a new generator from configuration.
    pub fn new(config: GenerationConfig) -> Self {
        let engine = PlacementEngine::new(config.placement.clone(), config.restart, config.seed);
        Self { config, engine }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Place the configured number of objects, re-placing until all are visible.
    pub fn populate<H: SceneHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        ctx: &PlacementContext<'_>,
        host: &mut H,
    ) -> Result<()> {
        let mut budget = self.config.restart.budget();

        loop {
            self.engine.place_objects_with_budget(scene, self.config.num_objects, ctx, host, &mut budget)?;

            let Some(min_pixels) = self.config.visibility.as_ref().map(|v| v.min_pixels_per_object) else {
                return Ok(());
            };

            match self.check_visibility(scene, host, min_pixels)? {
                None => {
                    log::debug!("Host cannot render; skipping visibility check");
                    return Ok(());
                }
                Some(report) if report.is_visible() => return Ok(()),
                Some(report) => {
                    log::info!(
                        "Some objects are occluded ({} of {} colors, smallest {:?} px); replacing objects",
                        report.distinct_colors(),
                        report.expected_colors,
                        report.smallest_count(),
                    );
                    scene.clear_objects(host)?;
                    budget.record_restart("objects not visible")?;
                }
            }
        }
    }

    /// Flat-render the scene's objects in distinct colors and count their pixels.
    fn check_visibility<H: SceneHost + ?Sized>(
        &mut self,
        scene: &Scene,
        host: &mut H,
        min_pixels: u32,
    ) -> Result<Option<VisibilityReport>> {
        let Some(renderer) = host.renderer() else {
            return Ok(None);
        };

        let palette = visibility::flat_palette(self.engine.rng_mut(), scene.len());
        let assignments: Vec<(ObjectHandle, Rgba)> = scene.objects().iter()
            .map(|o| o.handle)
            .zip(palette)
            .collect();

        // Removed when dropped
        let flat = tempfile::Builder::new()
            .prefix("shapegen_flat_")
            .suffix(".png")
            .tempfile()?;
        renderer.render_flat(flat.path(), &assignments)?;

        let report = visibility::check_visibility_file(flat.path(), scene.len(), min_pixels)?;
        Ok(Some(report))
    }

    /// Generate image `index`: populate the scene, render it into
    /// `output_dir` when the host can render, and annotate it.
    pub fn generate_image<H: SceneHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        index: usize,
        ctx: &PlacementContext<'_>,
        host: &mut H,
        output_dir: Option<&Path>,
    ) -> Result<SceneRecord> {
        scene.set_image(index);
        self.populate(scene, ctx, host)?;

        if let (Some(dir), Some(filename)) = (output_dir, scene.image_filename.as_deref()) {
            if let Some(renderer) = host.renderer() {
                renderer.render(&dir.join(filename))?;
            }
        }

        let relationships = compute_relationships(scene, self.config.relationship_epsilon);
        log::info!("Scene {}: placed {} objects", index, scene.len());
        Ok(SceneRecord::new(scene, relationships))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use image::{Rgba as Pixel, RgbaImage};
    use tempfile::TempDir;

    use crate::catalog::Catalog;
    use crate::core::error::Error;
    use crate::core::types::{Vec2, Vec3};
    use crate::host::{RecordingHost, Renderer};
    use crate::scene::{Direction, SceneSetup};

    /// Records objects and paints flat renders, hiding the last object while
    /// `hidden_passes` is non-zero.
    struct FlatHost {
        inner: RecordingHost,
        hidden_passes: u32,
        flat_calls: u32,
        renders: Vec<PathBuf>,
    }

    impl SceneHost for FlatHost {
        fn add_object(&mut self, shape_asset: &str, scale: f32, position: Vec2, rotation_degrees: f32) -> Result<ObjectHandle> {
            self.inner.add_object(shape_asset, scale, position, rotation_degrees)
        }

        fn add_material(&mut self, object: ObjectHandle, material_asset: &str, color: Rgba) -> Result<()> {
            self.inner.add_material(object, material_asset, color)
        }

        fn object_location(&self, object: ObjectHandle) -> Result<Vec3> {
            self.inner.object_location(object)
        }

        fn delete_object(&mut self, object: ObjectHandle) -> Result<()> {
            self.inner.delete_object(object)
        }

        fn renderer(&mut self) -> Option<&mut dyn Renderer> {
            Some(self)
        }
    }

    impl Renderer for FlatHost {
        fn render(&mut self, output: &Path) -> Result<()> {
            RgbaImage::from_pixel(8, 8, Pixel([90, 90, 90, 255])).save(output)?;
            self.renders.push(output.to_path_buf());
            Ok(())
        }

        fn render_flat(&mut self, output: &Path, colors: &[(ObjectHandle, Rgba)]) -> Result<()> {
            self.flat_calls += 1;
            let visible = if self.hidden_passes > 0 {
                self.hidden_passes -= 1;
                colors.len() - 1
            } else {
                colors.len()
            };

            // 5 rows of 40 pixels per visible object on a black background
            let mut image = RgbaImage::from_pixel(40, 40, Pixel([0, 0, 0, 255]));
            for (i, (_, rgba)) in colors.iter().take(visible).enumerate() {
                let pixel = Pixel(rgba.map(|c| (c * 255.0).round() as u8));
                for y in (i as u32 * 5)..(i as u32 * 5 + 5) {
                    for x in 0..40 {
                        image.put_pixel(x, y, pixel);
                    }
                }
            }
            image.save(output)?;
            Ok(())
        }
    }

    fn flat_host(catalog: &Catalog, hidden_passes: u32) -> FlatHost {
        FlatHost {
            inner: RecordingHost::for_catalog(catalog),
            hidden_passes,
            flat_calls: 0,
            renders: Vec::new(),
        }
    }

    fn fixtures() -> (Catalog, SceneSetup) {
        (Catalog::builtin().unwrap(), SceneSetup::default())
    }

    #[test]
    fn test_visibility_failure_replaces_objects() {
        let (catalog, setup) = fixtures();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
        let mut host = flat_host(&catalog, 2);
        let mut generator = SceneGenerator::new(GenerationConfig::default());

        generator.populate(&mut scene, &ctx, &mut host).unwrap();

        assert_eq!(host.flat_calls, 3);
        assert_eq!(scene.len(), 3);
        assert_eq!(host.inner.len(), 3);
        assert!(host.inner.deleted_count() >= 6);
    }

    #[test]
    fn test_visibility_restarts_are_bounded() {
        let (catalog, setup) = fixtures();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
        let mut host = flat_host(&catalog, u32::MAX);
        let config = GenerationConfig {
            restart: RestartPolicy::unbounded().with_max_restarts(2),
            ..Default::default()
        };
        let mut generator = SceneGenerator::new(config);

        let err = generator.populate(&mut scene, &ctx, &mut host).unwrap_err();
        assert!(matches!(err, Error::RestartLimit { .. }));
        assert_eq!(host.flat_calls, 3);
    }

    #[test]
    fn test_no_renderer_skips_visibility() {
        let (catalog, setup) = fixtures();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "test");
        let mut host = RecordingHost::for_catalog(&catalog);
        let mut generator = SceneGenerator::new(GenerationConfig::default());

        generator.populate(&mut scene, &ctx, &mut host).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(host.deleted_count(), 0);
    }

    #[test]
    fn test_generate_image_renders_and_annotates() {
        let (catalog, setup) = fixtures();
        let camera = setup.camera();
        let ctx = PlacementContext { catalog: &catalog, camera: &camera, resolution: setup.resolution() };
        let mut scene = Scene::new(setup.direction_frame().unwrap(), "train");
        let mut host = flat_host(&catalog, 0);
        let mut generator = SceneGenerator::new(GenerationConfig { num_objects: 4, ..Default::default() });
        let temp_dir = TempDir::new().expect("failed to create temp dir");

        let record = generator.generate_image(&mut scene, 12, &ctx, &mut host, Some(temp_dir.path())).unwrap();

        assert_eq!(record.image_index, 12);
        assert_eq!(record.split, "train");
        assert_eq!(record.objects.len(), 4);
        assert_eq!(host.renders, vec![temp_dir.path().join("00012.render.png")]);
        assert!(host.renders[0].exists());

        let right = record.relationships.get(Direction::Right).unwrap();
        assert_eq!(right.len(), 4);
        for (i, related) in right.iter().enumerate() {
            assert!(!related.contains(&i));
        }
    }
}
