//! # Holdfast Core
//!
//! First-person interaction and possession core for Holdfast.
//!
//! This crate couples player input, a raycast-based interactable scan, a
//! single-slot held-object model, and prompt UI, on top of the headless
//! reference scene in [`holdfast_scene`].
//!
//! ## Architecture
//!
//! - **Contracts** ([`interaction`]): `Interactable`, `Interactor`, `Usable`,
//!   `SecondaryUsable`
//! - **Controllers**: [`scanner::InteractionScanner`],
//!   [`possession::PossessionController`], [`locomotion::LocomotionController`]
//! - **Composition**: [`controller::FirstPersonController`] owns the three
//!   controllers and runs them in a fixed per-tick order
//! - **Objects** ([`objects`]): reference behaviors reached through explicit
//!   capability accessors
//!
//! ## Usage
//!
//! ```
//! use glam::Vec3;
//! use holdfast_core::config::ControllerConfig;
//! use holdfast_core::controller::FirstPersonController;
//! use holdfast_core::input::{Action, InputReader};
//! use holdfast_core::objects::{ObjectBehavior, PickableBox};
//! use holdfast_core::prompt::TextPanel;
//! use holdfast_core::world::World;
//! use holdfast_scene::{Collider, LayerMask, RigidBody, SceneObject};
//!
//! let mut world = World::default();
//! let mut input = InputReader::new();
//! let mut player = FirstPersonController::spawn(
//!     &mut world,
//!     &mut input,
//!     ControllerConfig::default(),
//!     Vec3::ZERO,
//!     Some(TextPanel::default()),
//! );
//!
//! let crate_id = world.spawn_with(
//!     SceneObject::at(Vec3::new(0.0, 1.6, -2.0))
//!         .with_collider(Collider::cuboid(Vec3::splat(0.25)))
//!         .with_layer(LayerMask::INTERACTABLE)
//!         .with_body(RigidBody::default()),
//!     ObjectBehavior::PickableBox(PickableBox::new()),
//! );
//!
//! player.tick(&mut world, &mut input, 1.0 / 60.0);
//! assert_eq!(player.scanner().candidate(), Some(crate_id));
//!
//! input.perform(Action::Interact);
//! player.tick(&mut world, &mut input, 1.0 / 60.0);
//! assert_eq!(player.possession().held_object(), Some(crate_id));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export the scene for engine-side types
pub use holdfast_scene;

pub mod config;
pub mod controller;
pub mod error;
pub mod input;
pub mod interaction;
pub mod locomotion;
pub mod objects;
pub mod possession;
pub mod prompt;
pub mod scanner;
pub mod world;

#[cfg(test)]
mod tests;
