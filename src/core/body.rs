use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::types::Rgb;
use crate::config::RADIUS_PER_MASS;

/// Radius of a body of the given mass. Linear, so a generated star of mass
/// `k / sqrt(d)` gets a radius proportional to `1 / sqrt(d)`.
pub fn radius_for_mass(mass: f64) -> f64 {
    RADIUS_PER_MASS * mass
}

/// A gravitating point mass ("star") with a collision radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub mass: f64,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Force accumulated during the current cycle; cleared by [`Body::update`].
    pub force: DVec2,
    pub radius: f64,
    pub color: Rgb,
}

impl Body {
    pub fn new(mass: f64, position: DVec2, velocity: DVec2, color: Rgb) -> Self {
        debug_assert!(mass > 0.0, "body mass must be positive, got {mass}");
        Self {
            mass,
            position,
            velocity,
            force: DVec2::ZERO,
            radius: radius_for_mass(mass),
            color,
        }
    }

    /// Overrides the mass-derived radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive, got {radius}");
        self.radius = radius;
        self
    }

    pub fn add_force(&mut self, force: DVec2) {
        self.force += force;
    }

    /// Forward Euler step: velocity first, then position from the new velocity.
    pub fn update(&mut self, dt: f64) {
        let acceleration = self.force / self.mass;
        self.velocity += acceleration * dt;
        self.position += self.velocity * dt;
        self.force = DVec2::ZERO;
    }

    /// Combines two colliding bodies into one.
    ///
    /// Mass is summed, position and velocity are mass-weighted averages, the radius
    /// is recomputed from the summed mass and the colour of `self` wins.
    pub fn merge(&self, other: &Body) -> Body {
        let mass = self.mass + other.mass;
        let weighted = |a: DVec2, b: DVec2| (a * self.mass + b * other.mass) / mass;
        Body {
            mass,
            position: weighted(self.position, other.position),
            velocity: weighted(self.velocity, other.velocity),
            force: self.force + other.force,
            radius: radius_for_mass(mass),
            color: self.color,
        }
    }

    /// A body whose position left the finite range is dead and must be purged.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (self.position - other.position).length()
    }

    /// True when the two discs intersect.
    pub fn overlaps(&self, other: &Body) -> bool {
        self.distance_to(other) < self.radius + other.radius
    }
}
