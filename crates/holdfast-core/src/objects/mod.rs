//! Reference object behaviors.
//!
//! [`ObjectBehavior`] is the closed set of behaviors shipped with the crate,
//! plus a [`Custom`](ObjectBehavior::Custom) escape hatch for user types.
//! Capabilities are reached through explicit accessors that return `None`
//! when a behavior does not support them.
//!
//! | Behavior | Interactable | Usable | SecondaryUsable |
//! |----------|--------------|--------|-----------------|
//! | [`PickableBox`] | pickup, refuses when hand full | - | lid toggle |
//! | [`ColorChangerBox`] | always | - | - |
//! | [`Lamp`] | always | - | - |
//! | [`Flashlight`] | pickup, refuses when hand full | beam toggle | - |

mod animator;
mod color_changer;
mod flashlight;
mod lamp;
mod pickable_box;

pub use animator::AnimationParams;
pub use color_changer::ColorChangerBox;
pub use flashlight::Flashlight;
pub use lamp::Lamp;
pub use pickable_box::{PickableBox, IS_OPEN_PARAM};

use crate::interaction::{Interactable, SecondaryUsable, Usable, WorldBehavior};

/// Behavior attached to a world object.
#[derive(Debug)]
pub enum ObjectBehavior {
    /// Carryable box with a lid.
    PickableBox(PickableBox),
    /// Box that recolours itself.
    ColorChangerBox(ColorChangerBox),
    /// Switchable lamp.
    Lamp(Lamp),
    /// Carryable flashlight.
    Flashlight(Flashlight),
    /// User-defined behavior.
    Custom(Box<dyn WorldBehavior>),
}

impl ObjectBehavior {
    /// Wraps a user-defined behavior.
    pub fn custom(behavior: impl WorldBehavior + 'static) -> Self {
        Self::Custom(Box::new(behavior))
    }

    // =========================================================================
    // Capabilities
    // =========================================================================

    /// Shared access to the interactable capability.
    #[must_use]
    pub fn as_interactable(&self) -> Option<&dyn Interactable> {
        match self {
            Self::PickableBox(b) => Some(b),
            Self::ColorChangerBox(b) => Some(b),
            Self::Lamp(l) => Some(l),
            Self::Flashlight(f) => Some(f),
            Self::Custom(c) => c.as_interactable(),
        }
    }

    /// Mutable access to the interactable capability.
    pub fn as_interactable_mut(&mut self) -> Option<&mut dyn Interactable> {
        match self {
            Self::PickableBox(b) => Some(b),
            Self::ColorChangerBox(b) => Some(b),
            Self::Lamp(l) => Some(l),
            Self::Flashlight(f) => Some(f),
            Self::Custom(c) => c.as_interactable_mut(),
        }
    }

    /// Mutable access to the primary-use capability.
    pub fn as_usable_mut(&mut self) -> Option<&mut dyn Usable> {
        match self {
            Self::Flashlight(f) => Some(f),
            Self::Custom(c) => c.as_usable_mut(),
            _ => None,
        }
    }

    /// Mutable access to the secondary-use capability.
    pub fn as_secondary_usable_mut(&mut self) -> Option<&mut dyn SecondaryUsable> {
        match self {
            Self::PickableBox(b) => Some(b),
            Self::Custom(c) => c.as_secondary_usable_mut(),
            _ => None,
        }
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    /// Returns the box if this is a [`PickableBox`].
    #[must_use]
    pub const fn as_pickable_box(&self) -> Option<&PickableBox> {
        match self {
            Self::PickableBox(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the box if this is a [`ColorChangerBox`].
    #[must_use]
    pub const fn as_color_changer(&self) -> Option<&ColorChangerBox> {
        match self {
            Self::ColorChangerBox(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the lamp if this is a [`Lamp`].
    #[must_use]
    pub const fn as_lamp(&self) -> Option<&Lamp> {
        match self {
            Self::Lamp(l) => Some(l),
            _ => None,
        }
    }

    /// Returns the flashlight if this is a [`Flashlight`].
    #[must_use]
    pub const fn as_flashlight(&self) -> Option<&Flashlight> {
        match self {
            Self::Flashlight(f) => Some(f),
            _ => None,
        }
    }

    /// Short name for logs and summaries.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::PickableBox(_) => "pickable_box",
            Self::ColorChangerBox(_) => "color_changer_box",
            Self::Lamp(_) => "lamp",
            Self::Flashlight(_) => "flashlight",
            Self::Custom(_) => "custom",
        }
    }
}

impl From<PickableBox> for ObjectBehavior {
    fn from(value: PickableBox) -> Self {
        Self::PickableBox(value)
    }
}

impl From<ColorChangerBox> for ObjectBehavior {
    fn from(value: ColorChangerBox) -> Self {
        Self::ColorChangerBox(value)
    }
}

impl From<Lamp> for ObjectBehavior {
    fn from(value: Lamp) -> Self {
        Self::Lamp(value)
    }
}

impl From<Flashlight> for ObjectBehavior {
    fn from(value: Flashlight) -> Self {
        Self::Flashlight(value)
    }
}
