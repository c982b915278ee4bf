//! World: scene plus object behaviors.
//!
//! The [`Scene`] owns spatial state (transforms, colliders, bodies,
//! attachments). The [`ObjectTable`] owns gameplay behavior keyed by the same
//! [`ObjectId`]. [`World`] keeps the two in step: spawning registers both,
//! despawning removes both.

use std::collections::BTreeMap;

use holdfast_scene::{ObjectId, Scene, SceneConfig, SceneObject};
use tracing::debug;

use crate::interaction::Interactable;
use crate::objects::ObjectBehavior;

/// Behaviors keyed by object id.
#[derive(Debug, Default)]
pub struct ObjectTable {
    behaviors: BTreeMap<ObjectId, ObjectBehavior>,
}

impl ObjectTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a behavior, replacing any previous one for `id`.
    pub fn insert(&mut self, id: ObjectId, behavior: ObjectBehavior) -> Option<ObjectBehavior> {
        self.behaviors.insert(id, behavior)
    }

    /// Removes a behavior.
    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectBehavior> {
        self.behaviors.remove(&id)
    }

    /// Returns the behavior for `id`.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&ObjectBehavior> {
        self.behaviors.get(&id)
    }

    /// Returns the behavior for `id` mutably.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut ObjectBehavior> {
        self.behaviors.get_mut(&id)
    }

    /// Whether `id` has a behavior.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.behaviors.contains_key(&id)
    }

    /// Interactable capability of `id`, if it exists and has one.
    #[must_use]
    pub fn interactable(&self, id: ObjectId) -> Option<&dyn Interactable> {
        self.get(id).and_then(ObjectBehavior::as_interactable)
    }

    /// Mutable interactable capability of `id`, if it exists and has one.
    pub fn interactable_mut(&mut self, id: ObjectId) -> Option<&mut dyn Interactable> {
        self.get_mut(id).and_then(ObjectBehavior::as_interactable_mut)
    }

    /// Iterates behaviors in id order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &ObjectBehavior)> {
        self.behaviors.iter().map(|(id, b)| (*id, b))
    }

    /// Number of registered behaviors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

/// Scene and behaviors under one owner.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use holdfast_core::objects::Lamp;
/// use holdfast_core::world::World;
/// use holdfast_scene::SceneObject;
///
/// let mut world = World::default();
/// let lamp = world.spawn_with(SceneObject::at(Vec3::Y), Lamp::default());
/// assert!(world.objects().interactable(lamp).is_some());
///
/// world.despawn(lamp);
/// assert!(!world.scene().contains(lamp));
/// assert!(world.objects().get(lamp).is_none());
/// ```
#[derive(Debug, Default)]
pub struct World {
    scene: Scene,
    objects: ObjectTable,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            scene: Scene::new(config),
            objects: ObjectTable::new(),
        }
    }

    /// Spawns a scene object with no behavior.
    pub fn spawn(&mut self, object: SceneObject) -> ObjectId {
        self.scene.spawn(object)
    }

    /// Spawns a scene object and registers its behavior.
    pub fn spawn_with(&mut self, object: SceneObject, behavior: impl Into<ObjectBehavior>) -> ObjectId {
        let id = self.scene.spawn(object);
        let behavior = behavior.into();
        debug!(object = %id, kind = behavior.kind(), "spawned");
        self.objects.insert(id, behavior);
        id
    }

    /// Removes an object and its behavior. Returns whether it existed.
    pub fn despawn(&mut self, id: ObjectId) -> bool {
        let had_behavior = self.objects.remove(id).is_some();
        let had_object = self.scene.despawn(id).is_some();
        if had_object || had_behavior {
            debug!(object = %id, "despawned");
        }
        had_object || had_behavior
    }

    /// The scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// The behavior table.
    #[must_use]
    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    /// The behavior table, mutably.
    pub fn objects_mut(&mut self) -> &mut ObjectTable {
        &mut self.objects
    }

    /// Borrows scene and behaviors mutably at the same time.
    pub fn split_mut(&mut self) -> (&mut Scene, &mut ObjectTable) {
        (&mut self.scene, &mut self.objects)
    }

    /// Advances body simulation and re-resolves attachments.
    pub fn step(&mut self, dt: f32) {
        self.scene.step(dt);
        self.scene.sync_attachments();
    }
}
