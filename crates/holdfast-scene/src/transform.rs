//! Rigid transforms (translation + rotation, no scale).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Position and orientation of an object.
///
/// The scene uses a right-handed, Y-up convention where an object's forward
/// axis is local `-Z`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in the parent space (world space for root objects).
    pub translation: Vec3,
    /// Orientation in the parent space.
    pub rotation: Quat,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Creates a transform at the given position with identity rotation.
    #[must_use]
    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Creates a transform from a translation and a rotation.
    #[must_use]
    pub const fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Local `-Z` expressed in the parent space.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Local `+X` expressed in the parent space.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Local `+Y` expressed in the parent space.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Maps a point from local space into the parent space.
    #[must_use]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * point
    }

    /// Maps a point from the parent space into local space.
    #[must_use]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation.inverse() * (point - self.translation)
    }

    /// Maps a direction from the parent space into local space.
    #[must_use]
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }
}

/// `parent * child` places `child` (expressed relative to `parent`) in the
/// parent's own space.
impl Mul for Transform {
    type Output = Transform;

    fn mul(self, child: Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_forward_is_negative_z() {
        assert_eq!(Transform::IDENTITY.forward(), Vec3::NEG_Z);
    }

    #[test]
    fn compose_applies_parent_rotation_to_child_offset() {
        let parent = Transform::new(Vec3::new(1.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2));
        let child = Transform::from_translation(Vec3::new(0.0, 0.0, -1.0));

        let world = parent * child;

        // Quarter turn left maps -Z onto -X.
        assert!((world.translation - Vec3::new(0.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn inverse_point_round_trips() {
        let t = Transform::new(Vec3::new(3.0, -2.0, 5.0), Quat::from_rotation_x(0.4));
        let p = Vec3::new(0.3, 0.7, -1.1);
        let back = t.inverse_transform_point(t.transform_point(p));
        assert!((back - p).length() < 1e-5);
    }
}
