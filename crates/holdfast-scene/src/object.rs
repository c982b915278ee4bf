//! Scene objects and their identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use glam::Vec3;

use crate::body::RigidBody;
use crate::collider::Collider;
use crate::layer::LayerMask;
use crate::transform::Transform;

/// Unique identifier for a scene object.
///
/// Ids are allocated monotonically and never reused, so a stale id held by a
/// gameplay system simply stops resolving once its object is despawned.
///
/// # Example
///
/// ```
/// use holdfast_scene::ObjectId;
///
/// let a = ObjectId::new(1);
/// let b = ObjectId::new(2);
/// assert!(a < b);
/// assert_eq!(a.as_u64(), 1);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ObjectId(u64);

impl ObjectId {
    /// Creates an `ObjectId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(id: u64) -> Self {
        Self::new(id)
    }
}

/// Explicit "attached-to" relation.
///
/// While attached, the object's world transform is `parent_world * local`,
/// recomputed by [`Scene::sync_attachments`](crate::Scene::sync_attachments).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Object this one follows.
    pub parent: ObjectId,
    /// Offset relative to the parent.
    pub local: Transform,
}

/// Everything the scene knows about one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// World transform (kept in sync for attached objects).
    pub transform: Transform,
    /// Parent relation, if attached.
    pub attachment: Option<Attachment>,
    /// Collision shape; objects without one are invisible to ray queries.
    pub collider: Option<Collider>,
    /// Layers this object lives on.
    pub layer: LayerMask,
    /// Physics body, if simulated.
    pub body: Option<RigidBody>,
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            transform: Transform::IDENTITY,
            attachment: None,
            collider: None,
            layer: LayerMask::DEFAULT,
            body: None,
        }
    }
}

impl SceneObject {
    /// Creates a bare object at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            transform: Transform::from_translation(position),
            ..Self::default()
        }
    }

    /// Sets the full transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Adds a collider.
    #[must_use]
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Sets the collision layer.
    #[must_use]
    pub fn with_layer(mut self, layer: LayerMask) -> Self {
        self.layer = layer;
        self
    }

    /// Adds a rigid body.
    #[must_use]
    pub fn with_body(mut self, body: RigidBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Requests an attachment to `parent` at `local`.
    ///
    /// Validated by [`Scene::spawn`](crate::Scene::spawn); an invalid
    /// attachment is dropped and the object spawns as a root.
    #[must_use]
    pub fn attached_to(mut self, parent: ObjectId, local: Transform) -> Self {
        self.attachment = Some(Attachment { parent, local });
        self
    }

    /// Whether this object currently follows a parent.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }
}
