//! Locomotion: gravity, jump, horizontal speed smoothing and look rotation.
//!
//! The state is a handful of scalars. Grounded vs airborne is read from the
//! [`CharacterMover`] each tick rather than stored.
//!
//! Angles are in degrees. Yaw turns the body about world up; pitch tilts the
//! camera about its local X axis (positive looks up).

use std::fmt;

use glam::{Quat, Vec2, Vec3};
use holdfast_scene::KinematicMover;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::{JumpConfig, LookConfig, MovementConfig};

/// Vertical velocity held while grounded so the mover stays glued to the
/// floor.
pub const GROUNDED_VELOCITY: f32 = -2.0;

/// Speeds below this snap to zero.
pub const SPEED_SNAP: f32 = 0.1;

/// Look input with a squared length below this is ignored.
pub const LOOK_THRESHOLD: f32 = 0.01;

/// Character mover driven by locomotion.
pub trait CharacterMover: fmt::Debug {
    /// Whether the mover rests on the ground.
    fn is_grounded(&self) -> bool;

    /// Moves by `delta`, resolving collisions.
    fn move_by(&mut self, delta: Vec3);

    /// Feet position.
    fn position(&self) -> Vec3;
}

impl CharacterMover for KinematicMover {
    fn is_grounded(&self) -> bool {
        KinematicMover::is_grounded(self)
    }

    fn move_by(&mut self, delta: Vec3) {
        KinematicMover::move_by(self, delta);
    }

    fn position(&self) -> Vec3 {
        KinematicMover::position(self)
    }
}

/// Scalar locomotion state.
///
/// # Example
///
/// ```
/// use holdfast_core::config::JumpConfig;
/// use holdfast_core::locomotion::LocomotionController;
/// use holdfast_scene::KinematicMover;
///
/// let mover = KinematicMover::new(glam::Vec3::ZERO, 0.0);
/// let mut locomotion = LocomotionController::default();
/// locomotion.jump(&mover, &JumpConfig::default());
/// assert!((locomotion.vertical_velocity() - 6.0).abs() < 1e-4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocomotionController {
    vertical_velocity: f32,
    current_speed: f32,
    yaw: f32,
    pitch: f32,
}

impl LocomotionController {
    /// Creates a controller at rest facing `yaw` degrees.
    #[must_use]
    pub fn new(yaw: f32) -> Self {
        Self {
            yaw,
            ..Self::default()
        }
    }

    /// Integrates vertical velocity for one tick.
    pub fn apply_gravity(&mut self, mover: &dyn CharacterMover, jump: &JumpConfig, dt: f32) {
        if mover.is_grounded() {
            if self.vertical_velocity < 0.0 {
                self.vertical_velocity = GROUNDED_VELOCITY;
            }
        } else {
            self.vertical_velocity =
                (self.vertical_velocity + jump.gravity * dt).max(-jump.terminal_velocity);
        }
    }

    /// Starts a jump if grounded. Returns whether it jumped.
    pub fn jump(&mut self, mover: &dyn CharacterMover, jump: &JumpConfig) -> bool {
        if !mover.is_grounded() {
            return false;
        }
        self.vertical_velocity = (jump.jump_height * -2.0 * jump.gravity).sqrt();
        trace!(velocity = self.vertical_velocity, "jump");
        true
    }

    /// Smooths horizontal speed toward its target and moves the mover.
    ///
    /// `move_axis.x` strafes along the body's right axis, `move_axis.y` moves
    /// along its forward axis.
    pub fn apply_movement(
        &mut self,
        mover: &mut dyn CharacterMover,
        movement: &MovementConfig,
        move_axis: Vec2,
        sprinting: bool,
        dt: f32,
    ) {
        let target = if move_axis == Vec2::ZERO {
            0.0
        } else if sprinting {
            movement.sprint_speed
        } else {
            movement.walk_speed
        };

        let t = (dt * movement.acceleration).clamp(0.0, 1.0);
        self.current_speed += (target - self.current_speed) * t;
        if self.current_speed < SPEED_SNAP {
            self.current_speed = 0.0;
        }

        let body = self.body_rotation();
        let right = body * Vec3::X;
        let forward = body * Vec3::NEG_Z;
        let direction = (right * move_axis.x + forward * move_axis.y).normalize_or_zero();

        let velocity = direction * self.current_speed + Vec3::Y * self.vertical_velocity;
        mover.move_by(velocity * dt);
    }

    /// Applies look input to yaw and pitch.
    pub fn apply_rotation(&mut self, look: &LookConfig, look_axis: Vec2) {
        if look_axis.length_squared() < LOOK_THRESHOLD {
            return;
        }
        self.yaw -= look_axis.x * look.sensitivity_x;
        self.pitch =
            (self.pitch + look_axis.y * look.sensitivity_y).clamp(look.lower_limit, look.upper_limit);
    }

    /// World rotation of the body (yaw only).
    #[must_use]
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw.to_radians())
    }

    /// Local rotation of the camera relative to the body (pitch only).
    #[must_use]
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    /// Vertical velocity (m/s, positive is up).
    #[must_use]
    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    /// Smoothed horizontal speed (m/s).
    #[must_use]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    /// Body yaw in degrees.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Camera pitch in degrees.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }
}
