//! Animation parameter block.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Named boolean parameters read by an external animation system.
///
/// Behaviors write flags here; the renderer side reads them. Unset flags
/// read as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationParams {
    flags: BTreeMap<String, bool>,
}

impl AnimationParams {
    /// Creates an empty parameter block.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a boolean parameter.
    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.flags.insert(name.to_owned(), value);
    }

    /// Reads a boolean parameter.
    #[must_use]
    pub fn get_bool(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }
}
