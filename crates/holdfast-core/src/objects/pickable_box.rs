//! Carryable box with a lid.

use holdfast_scene::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::animator::AnimationParams;
use crate::interaction::{Interactable, InteractionStatus, Interactor, SecondaryUsable};

/// Animation flag mirroring the lid state.
pub const IS_OPEN_PARAM: &str = "IsOpen";

/// A box the player can pick up and, while holding it, open and close.
///
/// # Example
///
/// ```
/// use holdfast_core::interaction::{Interactable, SecondaryUsable};
/// use holdfast_core::objects::PickableBox;
///
/// let mut crate_box = PickableBox::new();
/// assert!(crate_box.interaction_status(false).can_interact);
/// assert!(!crate_box.interaction_status(true).can_interact);
///
/// crate_box.on_secondary_use_start();
/// assert!(crate_box.is_open());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickableBox {
    prompt: String,
    is_open: bool,
    animation: Option<AnimationParams>,
}

impl Default for PickableBox {
    fn default() -> Self {
        Self::new()
    }
}

impl PickableBox {
    /// Default pickup prompt.
    pub const DEFAULT_PROMPT: &'static str = "[E] pick up";

    /// Creates a closed box with the default prompt and no animation.
    #[must_use]
    pub fn new() -> Self {
        Self {
            prompt: Self::DEFAULT_PROMPT.to_owned(),
            is_open: false,
            animation: None,
        }
    }

    /// Replaces the pickup prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Attaches an animation parameter block that mirrors the lid state.
    #[must_use]
    pub fn with_animation(mut self, animation: AnimationParams) -> Self {
        self.animation = Some(animation);
        self
    }

    /// Whether the lid is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Animation parameters, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&AnimationParams> {
        self.animation.as_ref()
    }
}

impl Interactable for PickableBox {
    fn interaction_status(&self, hand_is_full: bool) -> InteractionStatus {
        if hand_is_full {
            InteractionStatus::unavailable()
        } else {
            InteractionStatus::available(self.prompt.clone())
        }
    }

    fn interact(&mut self, this: ObjectId, interactor: &mut dyn Interactor) {
        interactor.pick_up_object(this);
    }
}

impl SecondaryUsable for PickableBox {
    fn on_secondary_use_start(&mut self) {
        self.is_open = !self.is_open;
        info!(open = self.is_open, "box lid toggled");
        if let Some(animation) = &mut self.animation {
            animation.set_bool(IS_OPEN_PARAM, self.is_open);
        }
    }

    // Toggle semantics: release does nothing.
    fn on_secondary_use_end(&mut self) {}
}
