//! Collision layers used to filter ray queries.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of collision layers.
    ///
    /// Every scene object lives on one or more layers; ray queries only
    /// consider objects whose layers intersect the query mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct LayerMask: u32 {
        /// Catch-all layer for untagged geometry.
        const DEFAULT = 1 << 0;
        /// Objects the player can interact with.
        const INTERACTABLE = 1 << 1;
        /// The player's own body and anchors.
        const PLAYER = 1 << 2;
        /// Static level geometry (walls, shelves).
        const ENVIRONMENT = 1 << 3;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default_layer() {
        assert_eq!(LayerMask::default(), LayerMask::DEFAULT);
    }

    #[test]
    fn masks_serialize() {
        let mask = LayerMask::INTERACTABLE | LayerMask::ENVIRONMENT;
        let json = serde_json::to_string(&mask).unwrap();
        let back: LayerMask = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mask);
    }
}
