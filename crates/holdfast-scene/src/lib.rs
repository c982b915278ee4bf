//! # Holdfast Scene
//!
//! Headless reference scene for the Holdfast first-person interaction core.
//!
//! The scene stands in for the engine collaborators the interaction layer
//! talks to. It is deliberately small:
//!
//! - **Objects**: transforms, optional colliders, a collision layer, and an
//!   optional rigid body, keyed by a never-reused [`ObjectId`]
//! - **Attachments**: an explicit "attached-to" relation resolved by
//!   [`Scene::sync_attachments`] once per tick
//! - **Ray queries**: nearest hit along a ray within a [`LayerMask`] filter
//! - **Bodies**: gravity integration and a floor plane, nothing more
//! - **Mover**: a ground-plane kinematic character mover
//!
//! ## Quick Start
//!
//! ```
//! use glam::Vec3;
//! use holdfast_scene::{Collider, LayerMask, Ray, Scene, SceneObject};
//!
//! let mut scene = Scene::default();
//! let crate_id = scene.spawn(
//!     SceneObject::at(Vec3::new(0.0, 1.0, -3.0))
//!         .with_collider(Collider::cuboid(Vec3::splat(0.5)))
//!         .with_layer(LayerMask::INTERACTABLE),
//! );
//!
//! let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
//! let hit = scene.raycast(&ray, 5.0, LayerMask::INTERACTABLE).unwrap();
//! assert_eq!(hit.object, crate_id);
//! assert!((hit.distance - 2.5).abs() < 1e-4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod collider;
pub mod error;
pub mod layer;
pub mod mover;
pub mod object;
pub mod ray;
pub mod scene;
pub mod transform;

// Re-exports for convenience
pub use body::{Interpolation, RigidBody};
pub use collider::Collider;
pub use error::SceneError;
pub use layer::LayerMask;
pub use mover::KinematicMover;
pub use object::{Attachment, ObjectId, SceneObject};
pub use ray::{Ray, RayHit};
pub use scene::{Scene, SceneConfig};
pub use transform::Transform;
