//! Input reader.
//!
//! Continuous state (axes, modifiers) is read directly each tick. Discrete
//! actions are delivered to per-subscriber queues that consumers drain once
//! per tick.
//!
//! Only the [`ActionPhase::Performed`] transition produces an event; press
//! and release phases are ignored.
//!
//! # Example
//!
//! ```
//! use holdfast_core::input::{Action, ActionPhase, InputReader};
//!
//! let mut input = InputReader::new();
//! let sub = input.subscribe(&[Action::Jump]);
//!
//! input.on_action(Action::Jump, ActionPhase::Started);
//! input.on_action(Action::Jump, ActionPhase::Performed);
//! input.on_action(Action::Interact, ActionPhase::Performed);
//!
//! assert_eq!(input.drain(sub), vec![Action::Jump]);
//! assert!(input.drain(sub).is_empty());
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Discrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Primary use / throw.
    Primary,
    /// Secondary use.
    Secondary,
    /// Interact with the looked-at object.
    Interact,
    /// Jump.
    Jump,
}

/// Phase of a binding transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionPhase {
    /// Binding began actuating.
    Started,
    /// Binding completed its interaction.
    Performed,
    /// Binding was released or interrupted.
    Canceled,
}

/// Continuous input state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Movement axis: `x` strafes right, `y` moves forward.
    pub move_axis: Vec2,
    /// Look axis: `x` turns right, `y` looks up.
    pub look_axis: Vec2,
    /// Held-object rotate axis.
    pub rotate_axis: f32,
    /// Sprint modifier.
    pub sprinting: bool,
    /// Precision modifier.
    pub precision: bool,
}

/// Handle to an action subscription.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u32);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

#[derive(Debug)]
struct Subscriber {
    actions: Vec<Action>,
    queue: VecDeque<Action>,
}

/// Input state plus discrete action fan-out.
#[derive(Debug, Default)]
pub struct InputReader {
    state: InputState,
    next_subscription: u32,
    subscribers: BTreeMap<SubscriptionId, Subscriber>,
    disabled: bool,
}

impl InputReader {
    /// Creates an enabled reader with neutral state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -------------------------------------------------------------------------
    // Continuous state
    // -------------------------------------------------------------------------

    /// Current continuous state.
    #[must_use]
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Replaces the whole continuous state.
    pub fn set_state(&mut self, state: InputState) {
        self.state = state;
    }

    /// Sets the movement axis.
    pub fn set_move(&mut self, axis: Vec2) {
        self.state.move_axis = axis;
    }

    /// Sets the look axis.
    pub fn set_look(&mut self, axis: Vec2) {
        self.state.look_axis = axis;
    }

    /// Sets the rotate axis.
    pub fn set_rotate(&mut self, value: f32) {
        self.state.rotate_axis = value;
    }

    /// Sets the sprint modifier.
    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.state.sprinting = sprinting;
    }

    /// Sets the precision modifier.
    pub fn set_precision(&mut self, precision: bool) {
        self.state.precision = precision;
    }

    // -------------------------------------------------------------------------
    // Discrete actions
    // -------------------------------------------------------------------------

    /// Feeds a binding transition.
    ///
    /// `Performed` is queued for every subscriber of `action`; other phases
    /// are ignored. Nothing is queued while the reader is disabled.
    pub fn on_action(&mut self, action: Action, phase: ActionPhase) {
        if self.disabled || phase != ActionPhase::Performed {
            return;
        }
        let mut delivered = 0usize;
        for subscriber in self.subscribers.values_mut() {
            if subscriber.actions.contains(&action) {
                subscriber.queue.push_back(action);
                delivered += 1;
            }
        }
        trace!(?action, delivered, "action performed");
    }

    /// Shorthand for `on_action(action, ActionPhase::Performed)`.
    pub fn perform(&mut self, action: Action) {
        self.on_action(action, ActionPhase::Performed);
    }

    /// Subscribes to `actions` and returns the handle used to drain them.
    pub fn subscribe(&mut self, actions: &[Action]) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.insert(
            id,
            Subscriber {
                actions: actions.to_vec(),
                queue: VecDeque::new(),
            },
        );
        id
    }

    /// Removes a subscription and discards its pending events.
    ///
    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(&id).is_some()
    }

    /// Whether `id` is a live subscription.
    #[must_use]
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.subscribers.contains_key(&id)
    }

    /// Takes every pending event for `id`, oldest first.
    ///
    /// Unknown subscriptions yield nothing.
    pub fn drain(&mut self, id: SubscriptionId) -> Vec<Action> {
        self.subscribers
            .get_mut(&id)
            .map(|s| s.queue.drain(..).collect())
            .unwrap_or_default()
    }

    /// Re-enables event delivery.
    pub fn enable(&mut self) {
        self.disabled = false;
    }

    /// Stops event delivery. Continuous state is left as is.
    pub fn disable(&mut self) {
        self.disabled = true;
    }

    /// Whether event delivery is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.disabled
    }
}
