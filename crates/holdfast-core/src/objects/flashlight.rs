//! Hand-held flashlight.

use holdfast_scene::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::interaction::{Interactable, InteractionStatus, Interactor, Usable};

/// Pickup-type item whose primary action toggles the beam.
///
/// Because it is [`Usable`], a primary action while holding it switches the
/// beam instead of throwing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashlight {
    beam_on: bool,
}

impl Flashlight {
    /// Pickup prompt.
    pub const PROMPT: &'static str = "[E] take flashlight";

    /// Creates a flashlight with the beam off.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the beam is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.beam_on
    }
}

impl Interactable for Flashlight {
    fn interaction_status(&self, hand_is_full: bool) -> InteractionStatus {
        if hand_is_full {
            InteractionStatus::unavailable()
        } else {
            InteractionStatus::available(Self::PROMPT)
        }
    }

    fn interact(&mut self, this: ObjectId, interactor: &mut dyn Interactor) {
        interactor.pick_up_object(this);
    }
}

impl Usable for Flashlight {
    fn on_use(&mut self) {
        self.beam_on = !self.beam_on;
        info!(on = self.beam_on, "flashlight toggled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn use_toggles_beam() {
        let mut light = Flashlight::new();
        light.on_use();
        assert!(light.is_on());
        light.on_use();
        assert!(!light.is_on());
    }

    #[test]
    fn refuses_with_full_hand() {
        assert!(!Flashlight::new().interaction_status(true).can_interact);
        assert!(Flashlight::new().interaction_status(false).can_interact);
    }
}
