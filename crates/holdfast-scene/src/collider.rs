//! Collider shapes and ray intersection.
//!
//! Intersection follows the usual engine convention: a ray that starts
//! inside a collider does not report that collider.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::ray::Ray;
use crate::transform::Transform;

const PARALLEL_EPSILON: f32 = 1e-8;

/// Collision shape, expressed in the owning object's local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Collider {
    /// Oriented box centred on the object, given by its half extents.
    Cuboid {
        /// Half size along each local axis.
        half_extents: Vec3,
    },
    /// Sphere centred on the object.
    Sphere {
        /// Sphere radius.
        radius: f32,
    },
}

impl Collider {
    /// Creates a box collider.
    #[must_use]
    pub const fn cuboid(half_extents: Vec3) -> Self {
        Self::Cuboid { half_extents }
    }

    /// Creates a sphere collider.
    #[must_use]
    pub const fn sphere(radius: f32) -> Self {
        Self::Sphere { radius }
    }

    /// Distance from the centre to the lowest point along world `-Y`,
    /// ignoring rotation. Used to rest bodies on the floor plane.
    #[must_use]
    pub fn bottom_extent(&self) -> f32 {
        match self {
            Self::Cuboid { half_extents } => half_extents.y,
            Self::Sphere { radius } => *radius,
        }
    }

    /// Returns the entry distance of `ray` into this collider placed at
    /// `transform`, if it is hit in front of the origin.
    #[must_use]
    pub fn intersect(&self, transform: &Transform, ray: &Ray) -> Option<f32> {
        match self {
            Self::Cuboid { half_extents } => {
                let origin = transform.inverse_transform_point(ray.origin);
                let direction = transform.inverse_transform_direction(ray.direction);
                intersect_box(origin, direction, *half_extents)
            }
            Self::Sphere { radius } => intersect_sphere(transform.translation, *radius, ray),
        }
    }
}

/// Slab test against an origin-centred box.
fn intersect_box(origin: Vec3, direction: Vec3, half_extents: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let h = half_extents[axis];

        if d.abs() < PARALLEL_EPSILON {
            if o.abs() > h {
                return None;
            }
            continue;
        }

        let mut t1 = (-h - o) / d;
        let mut t2 = (h - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return None;
        }
    }

    // Origin inside the box, or box entirely behind the ray.
    if t_min < 0.0 {
        return None;
    }
    Some(t_min)
}

fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;

    if c <= 0.0 {
        return None;
    }
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_4;

    fn forward_ray() -> Ray {
        Ray::new(Vec3::ZERO, Vec3::NEG_Z)
    }

    #[test]
    fn cuboid_hit_reports_entry_distance() {
        let collider = Collider::cuboid(Vec3::splat(0.5));
        let at = Transform::from_translation(Vec3::new(0.0, 0.0, -4.0));
        let t = collider.intersect(&at, &forward_ray()).unwrap();
        assert!((t - 3.5).abs() < 1e-5);
    }

    #[test]
    fn cuboid_behind_origin_is_missed() {
        let collider = Collider::cuboid(Vec3::splat(0.5));
        let at = Transform::from_translation(Vec3::new(0.0, 0.0, 4.0));
        assert!(collider.intersect(&at, &forward_ray()).is_none());
    }

    #[test]
    fn cuboid_containing_origin_is_missed() {
        let collider = Collider::cuboid(Vec3::splat(1.0));
        assert!(collider
            .intersect(&Transform::IDENTITY, &forward_ray())
            .is_none());
    }

    #[test]
    fn rotated_cuboid_uses_local_space() {
        // A thin slab rotated 45 degrees about Y still blocks a ray through its centre.
        let collider = Collider::cuboid(Vec3::new(1.0, 1.0, 0.05));
        let at = Transform::new(Vec3::new(0.0, 0.0, -2.0), Quat::from_rotation_y(FRAC_PI_4));
        let t = collider.intersect(&at, &forward_ray()).unwrap();
        assert!(t > 1.8 && t < 2.0);
    }

    #[test]
    fn cuboid_offset_sideways_is_missed() {
        let collider = Collider::cuboid(Vec3::splat(0.5));
        let at = Transform::from_translation(Vec3::new(2.0, 0.0, -4.0));
        assert!(collider.intersect(&at, &forward_ray()).is_none());
    }

    #[test]
    fn sphere_hit_reports_entry_distance() {
        let collider = Collider::sphere(1.0);
        let at = Transform::from_translation(Vec3::new(0.0, 0.0, -5.0));
        let t = collider.intersect(&at, &forward_ray()).unwrap();
        assert!((t - 4.0).abs() < 1e-5);
    }

    #[test]
    fn sphere_containing_origin_is_missed() {
        let collider = Collider::sphere(2.0);
        assert!(collider
            .intersect(&Transform::IDENTITY, &forward_ray())
            .is_none());
    }

    #[test]
    fn bottom_extent_matches_shape() {
        assert_eq!(Collider::cuboid(Vec3::new(1.0, 0.25, 1.0)).bottom_extent(), 0.25);
        assert_eq!(Collider::sphere(0.4).bottom_extent(), 0.4);
    }
}
