//! Rigid body state.
//!
//! The scene does not run a contact solver. A body only carries the flags a
//! gameplay layer toggles (kinematic, gravity, interpolation) and a linear
//! velocity that [`Scene::step`](crate::Scene::step) integrates.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Render interpolation mode of a body.
///
/// Stored for the renderer; the headless scene never reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    /// Render at the last simulated pose.
    None,
    /// Blend between the previous and current simulated pose.
    #[default]
    Interpolate,
    /// Predict the next pose from velocity.
    Extrapolate,
}

/// Linear rigid body attached to a scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBody {
    mass: f32,
    velocity: Vec3,
    kinematic: bool,
    use_gravity: bool,
    interpolation: Interpolation,
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl RigidBody {
    /// Creates a dynamic body with gravity and interpolation enabled.
    ///
    /// Non-positive masses are clamped to a small positive value.
    #[must_use]
    pub fn new(mass: f32) -> Self {
        Self {
            mass: mass.max(f32::EPSILON),
            velocity: Vec3::ZERO,
            kinematic: false,
            use_gravity: true,
            interpolation: Interpolation::Interpolate,
        }
    }

    /// Body mass in kilograms.
    #[must_use]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    /// Current linear velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Whether the body is driven by its transform instead of the simulation.
    #[must_use]
    pub fn is_kinematic(&self) -> bool {
        self.kinematic
    }

    /// Whether gravity is applied during integration.
    #[must_use]
    pub fn uses_gravity(&self) -> bool {
        self.use_gravity
    }

    /// Current interpolation mode.
    #[must_use]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Switches between kinematic and simulated.
    pub fn set_kinematic(&mut self, kinematic: bool) {
        self.kinematic = kinematic;
    }

    /// Enables or disables gravity.
    pub fn set_use_gravity(&mut self, use_gravity: bool) {
        self.use_gravity = use_gravity;
    }

    /// Sets the interpolation mode.
    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    /// Overwrites the linear velocity.
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Applies an instantaneous impulse (`Δv = impulse / mass`).
    ///
    /// Kinematic bodies ignore impulses.
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        if self.kinematic {
            return;
        }
        self.velocity += impulse / self.mass;
    }

    /// Whether [`Scene::step`](crate::Scene::step) should move this body.
    #[must_use]
    pub fn is_simulated(&self) -> bool {
        !self.kinematic
    }
}
