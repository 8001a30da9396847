//! Constrained random placement of objects on the ground plane.
//!
//! Objects are placed one at a time. Each candidate position must keep a
//! minimum clearance from every earlier object and must not sit ambiguously
//! close to alignment with one along any planar direction. When an object
//! runs out of attempts the whole batch is torn down and placed again.

use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::catalog::Catalog;
use crate::core::error::Error;
use crate::core::types::{Resolution, Result, Vec2};
use crate::host::SceneHost;
use crate::math::{CameraView, project_to_camera};
use crate::scene::{Direction, DirectionFrame, PlacedObject, Scene};
use super::config::{PlacementConfig, RestartBudget, RestartPolicy};

/// Read-only inputs shared by every placement in a run.
pub struct PlacementContext<'a> {
    pub catalog: &'a Catalog,
    pub camera: &'a dyn CameraView,
    pub resolution: Resolution,
}

/// Why a candidate position was rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Conflict {
    /// Too close to object `with`.
    Clearance { with: usize, clearance: f32 },
    /// Nearly aligned with object `with` along `direction`.
    Margin { with: usize, direction: Direction, margin: f32 },
}

/// Whether a projected offset is ambiguously small. Both ends are allowed.
pub fn margin_conflict(margin: f32, min_margin: f32) -> bool {
    margin > 0.0 && margin < min_margin
}

/// First constraint a candidate violates against the already placed objects.
pub fn find_conflict(
    config: &PlacementConfig,
    frame: &DirectionFrame,
    placed: &[PlacedObject],
    candidate: Vec2,
    radius: f32,
) -> Option<Conflict> {
    for (i, other) in placed.iter().enumerate() {
        let delta = candidate - other.position;
        let clearance = delta.length() - radius - other.radius;
        if clearance < config.min_clearance {
            return Some(Conflict::Clearance { with: i, clearance });
        }

        for direction in Direction::PLANAR {
            let axis = frame.get(direction);
            let margin = delta.x * axis.x + delta.y * axis.y;
            if margin_conflict(margin, config.min_margin) {
                return Some(Conflict::Margin { with: i, direction, margin });
            }
        }
    }
    None
}

/// Places batches of objects with a seedable random generator.
pub struct PlacementEngine {
    config: PlacementConfig,
    restart: RestartPolicy,
    rng: ChaCha8Rng,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig, restart: RestartPolicy, seed: u64) -> Self {
        Self::from_rng(config, restart, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_rng(config: PlacementConfig, restart: RestartPolicy, rng: ChaCha8Rng) -> Self {
        Self { config, restart, rng }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Replace the scene's objects with `count` freshly placed ones.
    ///
    /// Restarts are limited by the engine's restart policy.
    pub fn place_objects<H: SceneHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        count: usize,
        ctx: &PlacementContext<'_>,
        host: &mut H,
    ) -> Result<()> {
        let mut budget = self.restart.budget();
        self.place_objects_with_budget(scene, count, ctx, host, &mut budget)
    }

    /// Like [`place_objects`](Self::place_objects), drawing restarts from a
    /// caller-owned budget.
    pub fn place_objects_with_budget<H: SceneHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        count: usize,
        ctx: &PlacementContext<'_>,
        host: &mut H,
        budget: &mut RestartBudget,
    ) -> Result<()> {
        scene.directions.check_planar()?;

        loop {
            scene.clear_objects(host)?;

            match self.try_place_batch(scene, count, ctx, host)? {
                None => return Ok(()),
                Some(failed) => {
                    log::debug!(
                        "Object {}/{} found no position in {} attempts; restarting batch",
                        failed + 1,
                        count,
                        self.config.max_attempts,
                    );
                    scene.clear_objects(host)?;
                    budget.record_restart("placement attempts exhausted")?;
                }
            }
        }
    }

    /// Place `count` objects into an empty scene. Returns the index of the
    /// object that could not be placed, if any.
    fn try_place_batch<H: SceneHost + ?Sized>(
        &mut self,
        scene: &mut Scene,
        count: usize,
        ctx: &PlacementContext<'_>,
        host: &mut H,
    ) -> Result<Option<usize>> {
        for index in 0..count {
            let size = pick(&mut self.rng, ctx.catalog.sizes(), "sizes")?;
            let mut radius = size.radius;

            let Some(position) = self.find_position(scene, radius) else {
                return Ok(Some(index));
            };

            let shape = pick(&mut self.rng, ctx.catalog.shapes(), "shapes")?;
            let color = pick(&mut self.rng, ctx.catalog.colors(), "colors")?;

            if shape.is_cube() {
                radius /= std::f32::consts::SQRT_2;
            }

            let rotation = self.rng.gen_range(0.0..360.0);
            let material = pick(&mut self.rng, ctx.catalog.materials(), "materials")?;

            let handle = host.add_object(&shape.asset, radius, position, rotation)?;
            let coords = match host
                .add_material(handle, &material.asset, color.rgba)
                .and_then(|()| host.object_location(handle))
            {
                Ok(coords) => coords,
                Err(e) => {
                    // Not in the scene yet
                    host.delete_object(handle)?;
                    return Err(e);
                }
            };
            let pixel_coords = project_to_camera(
                ctx.camera,
                ctx.resolution.width,
                ctx.resolution.height,
                coords,
            );

            scene.push_object(PlacedObject {
                handle,
                shape: shape.name.clone(),
                shape_asset: shape.asset.clone(),
                size: size.name.clone(),
                material: material.name.clone(),
                material_asset: material.asset.clone(),
                color: color.name.clone(),
                rgba: color.rgba,
                position,
                radius,
                rotation,
                coords,
                pixel_coords,
            });
        }
        Ok(None)
    }

    /// Draw candidates until one satisfies every constraint.
    fn find_position(&mut self, scene: &Scene, radius: f32) -> Option<Vec2> {
        let h = self.config.area_half_extent;

        for _ in 0..self.config.max_attempts {
            let candidate = Vec2::new(self.rng.gen_range(-h..h), self.rng.gen_range(-h..h));

            match find_conflict(&self.config, &scene.directions, scene.objects(), candidate, radius) {
                None => return Some(candidate),
                Some(Conflict::Margin { direction, margin, .. }) => {
                    log::trace!("Rejected candidate: margin {:.3} along {}", margin, direction);
                }
                Some(Conflict::Clearance { .. }) => {}
            }
        }
        None
    }
}

fn pick<'a, T>(rng: &mut ChaCha8Rng, items: &'a [T], what: &str) -> Result<&'a T> {
    items.choose(rng).ok_or_else(|| Error::Config(format!("catalog has no {}", what)))
}
