//! Generation configuration: placement constants, restart policy, visibility.

use std::time::{Duration, Instant};

use crate::core::error::Error;
use crate::core::types::Result;

/// Constraints of the placement search.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    /// Candidates are drawn from [-h, h] on both ground axes.
    pub area_half_extent: f32,
    /// Minimum gap between two footprints.
    pub min_clearance: f32,
    /// Projected offsets along a planar direction must not fall in (0, min_margin).
    pub min_margin: f32,
    /// Candidates tried per object before the whole batch restarts.
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            area_half_extent: 3.0,
            min_clearance: 0.25,
            min_margin: 0.4,
            max_attempts: 50,
        }
    }
}

/// Limits on full-batch restarts. `None` means unlimited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RestartPolicy {
    pub max_restarts: Option<u32>,
    pub time_limit: Option<Duration>,
}

impl RestartPolicy {
    /// Restart forever.
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_max_restarts(mut self, max_restarts: u32) -> Self {
        self.max_restarts = Some(max_restarts);
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// Time limit given in seconds, as read from user input.
    pub fn with_time_limit_secs(self, secs: f64) -> Result<Self> {
        let limit = Duration::try_from_secs_f64(secs)
            .map_err(|e| Error::Config(format!("invalid time limit {} s: {}", secs, e)))?;
        Ok(self.with_time_limit(limit))
    }

    /// Start counting restarts for one scene.
    pub fn budget(&self) -> RestartBudget {
        RestartBudget {
            policy: *self,
            restarts: 0,
            started: Instant::now(),
        }
    }
}

/// Restarts consumed so far for one scene.
#[derive(Clone, Debug)]
pub struct RestartBudget {
    policy: RestartPolicy,
    restarts: u32,
    started: Instant,
}

impl RestartBudget {
    pub fn restarts(&self) -> u32 {
        self.restarts
    }

    /// Count one restart, failing once the policy is exceeded.
    pub fn record_restart(&mut self, reason: &str) -> Result<()> {
        self.restarts += 1;

        if let Some(max) = self.policy.max_restarts {
            if self.restarts > max {
                return Err(Error::RestartLimit {
                    restarts: self.restarts - 1,
                    reason: reason.to_string(),
                });
            }
        }

        if let Some(limit) = self.policy.time_limit {
            if self.started.elapsed() >= limit {
                return Err(Error::RestartLimit {
                    restarts: self.restarts,
                    reason: format!("{} (time limit {:?} reached)", reason, limit),
                });
            }
        }

        Ok(())
    }
}

/// Flat-render visibility check settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityConfig {
    /// Every object and the background must cover at least this many pixels.
    pub min_pixels_per_object: u32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self { min_pixels_per_object: 200 }
    }
}

/// Configuration for the scene generation pipeline.
#[derive(Clone, Debug)]
pub struct GenerationConfig {
    /// Seed of the placement random generator.
    pub seed: u64,
    /// Objects per scene.
    pub num_objects: usize,
    pub placement: PlacementConfig,
    /// Minimum projected offset for a directional relationship.
    pub relationship_epsilon: f32,
    /// Visibility check, run whenever the host can render.
    pub visibility: Option<VisibilityConfig>,
    pub restart: RestartPolicy,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            num_objects: 3,
            placement: PlacementConfig::default(),
            relationship_epsilon: super::relationships::DEFAULT_EPSILON,
            visibility: Some(VisibilityConfig::default()),
            restart: RestartPolicy::unbounded(),
        }
    }
}
