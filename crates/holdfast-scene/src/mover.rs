//! Ground-plane kinematic character mover.
//!
//! Stands in for an engine character controller: it moves by whatever delta
//! it is given, never sinks below the floor plane, and reports whether the
//! last move ended on the ground.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Kinematic mover colliding only with a horizontal floor plane.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use holdfast_scene::KinematicMover;
///
/// let mut mover = KinematicMover::new(Vec3::new(0.0, 1.0, 0.0), 0.0);
/// mover.move_by(Vec3::new(0.0, -5.0, 0.0));
/// assert!(mover.is_grounded());
/// assert_eq!(mover.position().y, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicMover {
    position: Vec3,
    ground_height: f32,
    grounded: bool,
}

impl KinematicMover {
    /// Creates a mover at `position` above a floor at `ground_height`.
    ///
    /// The mover counts as grounded if it starts on (or below) the floor.
    #[must_use]
    pub fn new(position: Vec3, ground_height: f32) -> Self {
        let grounded = position.y <= ground_height;
        Self {
            position: Vec3::new(position.x, position.y.max(ground_height), position.z),
            ground_height,
            grounded,
        }
    }

    /// Current feet position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Whether the last move ended resting on the floor.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Teleports the mover without collision.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.grounded = position.y <= self.ground_height;
    }

    /// Moves by `delta`, stopping at the floor.
    ///
    /// Moving upward always leaves the ground; a downward or level move that
    /// reaches the floor lands.
    pub fn move_by(&mut self, delta: Vec3) {
        let mut target = self.position + delta;
        if target.y <= self.ground_height {
            target.y = self.ground_height;
            self.grounded = delta.y <= 0.0;
        } else {
            self.grounded = false;
        }
        self.position = target;
    }
}
