//! Interaction contracts.
//!
//! World objects opt into gameplay through small capability traits:
//!
//! - [`Interactable`]: answers "can you interact with me" and performs the
//!   interaction when the player presses interact while looking at it
//! - [`Usable`]: primary action while the object is held
//! - [`SecondaryUsable`]: secondary action while the object is held
//!
//! The player side implements [`Interactor`] (receives objects) and the
//! scanner implements [`HandStatusListener`] (learns whether the hand is
//! full).
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use holdfast_core::interaction::{Interactable, InteractionStatus, Interactor};
//! use holdfast_scene::ObjectId;
//!
//! #[derive(Debug, Default)]
//! struct Doorbell {
//!     rings: u32,
//! }
//!
//! impl Interactable for Doorbell {
//!     fn interaction_status(&self, _hand_is_full: bool) -> InteractionStatus {
//!         InteractionStatus::available("[E] ring")
//!     }
//!
//!     fn interact(&mut self, _this: ObjectId, _interactor: &mut dyn Interactor) {
//!         self.rings += 1;
//!     }
//! }
//!
//! let bell = Doorbell::default();
//! assert!(bell.interaction_status(true).can_interact);
//! ```

use std::fmt;

use glam::Vec3;
use holdfast_scene::ObjectId;
use serde::{Deserialize, Serialize};

/// Answer to "can you interact with me right now".
///
/// Produced fresh on every query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionStatus {
    /// Whether interaction is currently possible.
    pub can_interact: bool,
    /// Prompt shown to the player (e.g. `"[E] pick up"`).
    pub prompt_message: String,
}

impl InteractionStatus {
    /// Creates a status.
    #[must_use]
    pub fn new(can_interact: bool, prompt_message: impl Into<String>) -> Self {
        Self {
            can_interact,
            prompt_message: prompt_message.into(),
        }
    }

    /// Interaction possible, with a prompt.
    #[must_use]
    pub fn available(prompt_message: impl Into<String>) -> Self {
        Self::new(true, prompt_message)
    }

    /// Interaction refused, with an empty prompt.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(false, String::new())
    }
}

/// Something the player can interact with by looking at it.
pub trait Interactable {
    /// Reports whether interaction is possible given the player's hand state.
    fn interaction_status(&self, hand_is_full: bool) -> InteractionStatus;

    /// Performs the interaction.
    ///
    /// `this` is the id of the object being interacted with, so
    /// implementations can hand themselves to the interactor.
    fn interact(&mut self, this: ObjectId, interactor: &mut dyn Interactor);
}

/// An agent that can take possession of objects.
pub trait Interactor {
    /// World-space reference point of the agent.
    fn origin(&self) -> Vec3;

    /// Asks the agent to pick up `object`.
    ///
    /// Agents that already hold something ignore the request.
    fn pick_up_object(&mut self, object: ObjectId);
}

/// Primary action of a held object (e.g. firing, switching on).
pub trait Usable {
    /// Called when the primary action is performed while held.
    fn on_use(&mut self);
}

/// Secondary action of a held object (e.g. opening a lid, aiming).
pub trait SecondaryUsable {
    /// Called when the secondary action is performed while held.
    fn on_secondary_use_start(&mut self);

    /// Called when the secondary action is released, for hold-style actions.
    fn on_secondary_use_end(&mut self);
}

/// Receives hand-full notifications from the possession side.
pub trait HandStatusListener {
    /// Called whenever the hand becomes full (`true`) or empty (`false`).
    fn set_hand_status(&mut self, is_full: bool);
}

/// Capability lookup for user-defined object behaviors.
///
/// Every accessor defaults to `None`; implement the ones the behavior
/// supports.
pub trait WorldBehavior: fmt::Debug {
    /// Shared access to the interactable capability.
    fn as_interactable(&self) -> Option<&dyn Interactable> {
        None
    }

    /// Mutable access to the interactable capability.
    fn as_interactable_mut(&mut self) -> Option<&mut dyn Interactable> {
        None
    }

    /// Mutable access to the primary-use capability.
    fn as_usable_mut(&mut self) -> Option<&mut dyn Usable> {
        None
    }

    /// Mutable access to the secondary-use capability.
    fn as_secondary_usable_mut(&mut self) -> Option<&mut dyn SecondaryUsable> {
        None
    }
}
