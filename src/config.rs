//! Global configuration constants and tunable settings for the simulator.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Default gravitational constant.
pub const DEFAULT_GRAVITY: f64 = 1.0;

/// Default integration timestep, applied once per rendered frame.
pub const DEFAULT_TIME_STEP: f64 = 0.04;

/// Default number of worker threads computing forces.
pub const DEFAULT_WORKER_COUNT: usize = 4;

/// Radius of a body per unit of mass.
pub const RADIUS_PER_MASS: f64 = 1.0;

/// Default canvas size in pixels.
pub const DEFAULT_CANVAS_WIDTH: usize = 800;
pub const DEFAULT_CANVAS_HEIGHT: usize = 600;

/// Brightness kept per frame when fading trails.
pub const DEFAULT_TRAIL_FADE: f32 = 0.92;

/// Frame budget used for the overrun warning, in milliseconds.
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 1000.0 / 30.0;

/// Star count range of a generated galaxy (upper bound exclusive).
pub const DEFAULT_MIN_STARS: usize = 500;
pub const DEFAULT_MAX_STARS: usize = 1000;

/// Radius range of a generated galaxy.
pub const DEFAULT_MIN_GALAXY_RADIUS: f64 = 50.0;
pub const DEFAULT_MAX_GALAXY_RADIUS: f64 = 200.0;

/// Mass of a star is `STAR_MASS_NUMERATOR / sqrt(distance from galaxy centre)`.
pub const DEFAULT_STAR_MASS_NUMERATOR: f64 = 10.0;

/// Smallest distance from the galaxy centre used for the mass formula.
pub const DEFAULT_MIN_STAR_DISTANCE: f64 = 0.5;

/// Orbital speed jitter applied to each generated star.
pub const DEFAULT_SPEED_JITTER: (f64, f64) = (0.25, 1.25);

/// Physics settings shared by the coordinator and every worker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub gravity: f64,
    pub time_step: f64,
    pub worker_count: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            worker_count: DEFAULT_WORKER_COUNT,
        }
    }
}

impl SimConfig {
    pub fn with_workers(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gravity.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "time_step must be positive and finite, got {}",
                self.time_step
            )));
        }
        if self.worker_count == 0 {
            return Err(SimError::InvalidConfig(
                "worker_count must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Parameters of the random galaxy generator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    pub min_stars: usize,
    pub max_stars: usize,
    pub min_radius: f64,
    pub max_radius: f64,
    pub mass_numerator: f64,
    pub min_star_distance: f64,
    pub speed_jitter: (f64, f64),
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            min_stars: DEFAULT_MIN_STARS,
            max_stars: DEFAULT_MAX_STARS,
            min_radius: DEFAULT_MIN_GALAXY_RADIUS,
            max_radius: DEFAULT_MAX_GALAXY_RADIUS,
            mass_numerator: DEFAULT_STAR_MASS_NUMERATOR,
            min_star_distance: DEFAULT_MIN_STAR_DISTANCE,
            speed_jitter: DEFAULT_SPEED_JITTER,
        }
    }
}

impl GalaxyConfig {
    pub fn validate(&self) -> Result<()> {
        if self.min_stars == 0 || self.min_stars >= self.max_stars {
            return Err(SimError::InvalidConfig(format!(
                "star range must be non-empty and start above zero, got {}..{}",
                self.min_stars, self.max_stars
            )));
        }
        if !(self.min_radius > 0.0 && self.min_radius < self.max_radius) {
            return Err(SimError::InvalidConfig(format!(
                "galaxy radius range is invalid: {}..{}",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.mass_numerator > 0.0 && self.min_star_distance > 0.0) {
            return Err(SimError::InvalidConfig(
                "mass_numerator and min_star_distance must be positive".to_owned(),
            ));
        }
        let (low, high) = self.speed_jitter;
        if !(low >= 0.0 && low < high) {
            return Err(SimError::InvalidConfig(format!(
                "speed jitter range is invalid: {low}..{high}"
            )));
        }
        Ok(())
    }
}

/// Settings of the headless frame loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: usize,
    pub height: usize,
    pub trail_fade: f32,
    pub frame_budget_ms: f32,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            trail_fade: DEFAULT_TRAIL_FADE,
            frame_budget_ms: DEFAULT_FRAME_BUDGET_MS,
        }
    }
}

impl FrameConfig {
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SimError::InvalidConfig(format!(
                "canvas must not be empty, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.trail_fade) {
            return Err(SimError::InvalidConfig(format!(
                "trail_fade must lie in [0, 1], got {}",
                self.trail_fade
            )));
        }
        Ok(())
    }
}
