//! Random "galaxy" generation: discs of stars orbiting a common centre.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    config::GalaxyConfig,
    core::{body::Body, types::Rgb},
    error::Result,
};

pub struct GalaxyGenerator {
    config: GalaxyConfig,
    rng: StdRng,
}

impl GalaxyGenerator {
    pub fn new(config: GalaxyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Deterministic generator, for tests and reproducible demos.
    pub fn seeded(config: GalaxyConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    /// Creates a disc of stars spinning the same way around `center`.
    ///
    /// Stars are biased toward the centre, heavier the closer they are, and move
    /// tangentially with a speed of roughly `sqrt(distance)`.
    pub fn generate(&mut self, center: DVec2) -> Vec<Body> {
        let count = self
            .rng
            .random_range(self.config.min_stars..self.config.max_stars);
        let radius = self
            .rng
            .random_range(self.config.min_radius..self.config.max_radius);
        let direction = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let (jitter_low, jitter_high) = self.config.speed_jitter;

        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..TAU);
            let distance = self.rng.random_range(0.0..radius.sqrt())
                * self.rng.random_range(0.0..radius.sqrt());
            let offset = DVec2::new(distance * angle.sin(), distance * angle.cos());
            let velocity = DVec2::new(-angle.cos(), angle.sin())
                * distance.sqrt()
                * direction
                * self.rng.random_range(jitter_low..jitter_high);
            let color = Rgb::new(
                self.rng.random_range(192..=255),
                self.rng.random_range(192..=255),
                self.rng.random_range(128..192),
            );
            let mass = self.config.mass_numerator
                / offset.length().max(self.config.min_star_distance).sqrt();

            stars.push(Body::new(mass, center + offset, velocity, color));
        }

        log::debug!(
            "generated galaxy of {count} stars, radius {radius:.1}, at ({:.1}, {:.1})",
            center.x,
            center.y
        );
        stars
    }
}
