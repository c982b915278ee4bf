//! Scene errors.

use thiserror::Error;

use crate::object::ObjectId;

/// Errors returned by scene graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The object does not exist (never spawned, or despawned).
    #[error("unknown object {0}")]
    UnknownObject(ObjectId),
    /// An object cannot be attached to itself.
    #[error("object {0} cannot be attached to itself")]
    SelfAttachment(ObjectId),
    /// The attachment would make an object its own ancestor.
    #[error("attaching {child} to {parent} would create a cycle")]
    AttachmentCycle {
        /// Object being attached.
        child: ObjectId,
        /// Requested parent.
        parent: ObjectId,
    },
}
