//! Interaction prompt.
//!
//! [`Prompt`] caches the last applied `(active, message)` pair and only
//! touches the [`PromptSurface`] when it changes.

use serde::{Deserialize, Serialize};

/// UI surface that displays the interaction prompt.
pub trait PromptSurface {
    /// Shows or hides the prompt panel.
    fn set_panel_visible(&mut self, visible: bool);

    /// Replaces the prompt text.
    fn set_text(&mut self, text: &str);
}

/// Recording surface: keeps its state and counts writes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextPanel {
    visible: bool,
    text: String,
    visibility_writes: u32,
    text_writes: u32,
}

impl TextPanel {
    /// Whether the panel is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of `set_panel_visible` calls.
    #[must_use]
    pub fn visibility_writes(&self) -> u32 {
        self.visibility_writes
    }

    /// Number of `set_text` calls.
    #[must_use]
    pub fn text_writes(&self) -> u32 {
        self.text_writes
    }

    /// Total surface writes.
    #[must_use]
    pub fn writes(&self) -> u32 {
        self.visibility_writes + self.text_writes
    }
}

impl PromptSurface for TextPanel {
    fn set_panel_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.visibility_writes += 1;
    }

    fn set_text(&mut self, text: &str) {
        text.clone_into(&mut self.text);
        self.text_writes += 1;
    }
}

/// Last applied prompt state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptState {
    /// Whether the prompt is shown.
    pub active: bool,
    /// Prompt text (meaningful only while active).
    pub message: String,
}

/// Prompt driver with idempotent writes.
///
/// # Example
///
/// ```
/// use holdfast_core::prompt::{Prompt, TextPanel};
///
/// let mut prompt = Prompt::new(Some(TextPanel::default()));
/// let before = prompt.surface().unwrap().writes();
///
/// assert!(prompt.show(true, "[E] pick up"));
/// assert!(!prompt.show(true, "[E] pick up"));
/// assert_eq!(prompt.surface().unwrap().writes(), before + 2);
/// ```
#[derive(Debug, Clone)]
pub struct Prompt<S> {
    state: PromptState,
    surface: Option<S>,
    panel_visible: bool,
}

impl<S: PromptSurface> Prompt<S> {
    /// Creates a driver and hides the panel.
    ///
    /// Without a surface the driver still tracks state but writes nothing.
    pub fn new(mut surface: Option<S>) -> Self {
        if let Some(surface) = &mut surface {
            surface.set_panel_visible(false);
        }
        Self {
            state: PromptState::default(),
            surface,
            panel_visible: false,
        }
    }

    /// Applies `(active, message)`. Returns whether anything changed.
    ///
    /// Hiding leaves the text untouched. Showing writes visibility only if it
    /// changed and always writes the text.
    pub fn show(&mut self, active: bool, message: &str) -> bool {
        if self.state.active == active && self.state.message == message {
            return false;
        }
        self.state.active = active;
        message.clone_into(&mut self.state.message);

        if let Some(surface) = &mut self.surface {
            if self.panel_visible != active {
                surface.set_panel_visible(active);
                self.panel_visible = active;
            }
            if active {
                surface.set_text(message);
            }
        }
        true
    }

    /// Hides the prompt.
    pub fn hide(&mut self) -> bool {
        self.show(false, "")
    }

    /// Last applied state.
    #[must_use]
    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// Whether the prompt is shown.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// The surface, if one was provided.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }
}
