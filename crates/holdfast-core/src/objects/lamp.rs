//! Wall lamp with an on/off switch.

use holdfast_scene::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::interaction::{Interactable, InteractionStatus, Interactor};

/// Toggle-type interactable. Usable with full or empty hands.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lamp {
    lit: bool,
}

impl Lamp {
    /// Creates a lamp in the given state.
    #[must_use]
    pub fn new(lit: bool) -> Self {
        Self { lit }
    }

    /// Whether the lamp is on.
    #[must_use]
    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Interactable for Lamp {
    fn interaction_status(&self, _hand_is_full: bool) -> InteractionStatus {
        InteractionStatus::available(if self.lit { "[E] turn off" } else { "[E] turn on" })
    }

    fn interact(&mut self, this: ObjectId, _interactor: &mut dyn Interactor) {
        self.lit = !self.lit;
        info!(object = %this, lit = self.lit, "lamp switched");
    }
}
