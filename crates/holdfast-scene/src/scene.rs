//! Scene: top-level container for objects, attachments and bodies.
//!
//! # Attachment Synchronization
//!
//! Attached objects do **not** follow their parent automatically. Gameplay
//! code moves roots (or edits local offsets) and then calls
//! [`Scene::sync_attachments`] once per tick to propagate world transforms
//! down the hierarchy. [`Scene::attach`] places the child immediately so a
//! freshly attached object never renders at its old pose for a frame.
//!
//! # Determinism
//!
//! Objects are stored in a `BTreeMap`, so iteration (and therefore ray-query
//! tie breaking and body integration) always runs in id order.

use std::collections::BTreeMap;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::body::RigidBody;
use crate::error::SceneError;
use crate::layer::LayerMask;
use crate::object::{Attachment, ObjectId, SceneObject};
use crate::ray::{Ray, RayHit};
use crate::transform::Transform;

/// Configuration for a [`Scene`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Gravity acceleration applied to simulated bodies (m/s²).
    pub gravity: Vec3,
    /// Height of the infinite floor plane.
    pub ground_height: f32,
    /// Horizontal velocity damping for bodies resting on the floor (1/s).
    pub ground_friction: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ground_height: 0.0,
            ground_friction: 4.0,
        }
    }
}

/// The scene: objects keyed by [`ObjectId`].
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use holdfast_scene::{Scene, SceneObject, Transform};
///
/// let mut scene = Scene::default();
/// let parent = scene.spawn(SceneObject::at(Vec3::new(1.0, 0.0, 0.0)));
/// let child = scene.spawn(SceneObject::default());
///
/// scene
///     .attach(child, parent, Transform::from_translation(Vec3::Y))
///     .unwrap();
/// assert_eq!(scene.get(child).unwrap().transform.translation, Vec3::new(1.0, 1.0, 0.0));
///
/// scene.set_transform(parent, Transform::from_translation(Vec3::ZERO)).unwrap();
/// scene.sync_attachments();
/// assert_eq!(scene.get(child).unwrap().transform.translation, Vec3::Y);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    config: SceneConfig,
    /// Monotonically increasing id counter; ids start at 1.
    next_id: u64,
    objects: BTreeMap<ObjectId, SceneObject>,
    tick: u64,
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            next_id: 0,
            objects: BTreeMap::new(),
            tick: 0,
        }
    }

    /// Returns the scene configuration.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Number of completed [`Scene::step`] calls.
    #[must_use]
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Adds an object and returns its new id.
    ///
    /// An attachment on `object` is validated; an invalid one is dropped and
    /// the object spawns as a root.
    pub fn spawn(&mut self, mut object: SceneObject) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId::new(self.next_id);

        let attachment = object.attachment.take();
        self.objects.insert(id, object);

        if let Some(attachment) = attachment {
            if let Err(err) = self.attach(id, attachment.parent, attachment.local) {
                debug!(object = %id, error = %err, "spawn attachment rejected");
            }
        }
        id
    }

    /// Removes an object.
    ///
    /// Children attached to it are detached in place (they keep their current
    /// world transform).
    pub fn despawn(&mut self, id: ObjectId) -> Option<SceneObject> {
        let removed = self.objects.remove(&id)?;
        for (child_id, child) in &mut self.objects {
            if child.attachment.is_some_and(|a| a.parent == id) {
                child.attachment = None;
                debug!(object = %child_id, parent = %id, "detached from despawned parent");
            }
        }
        Some(removed)
    }

    /// Whether the object exists.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Returns an object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    /// Returns a mutable object by id.
    ///
    /// Editing `attachment` through this reference bypasses cycle checks;
    /// prefer [`Scene::attach`] and [`Scene::detach`].
    #[must_use]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    /// Returns the body of an object, if it has one.
    #[must_use]
    pub fn body(&self, id: ObjectId) -> Option<&RigidBody> {
        self.objects.get(&id).and_then(|o| o.body.as_ref())
    }

    /// Returns the mutable body of an object, if it has one.
    #[must_use]
    pub fn body_mut(&mut self, id: ObjectId) -> Option<&mut RigidBody> {
        self.objects.get_mut(&id).and_then(|o| o.body.as_mut())
    }

    /// Iterates object ids in ascending order.
    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects.keys().copied()
    }

    /// Number of live objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    // -------------------------------------------------------------------------
    // Transforms and attachments
    // -------------------------------------------------------------------------

    /// Returns the world transform of an object.
    #[must_use]
    pub fn transform(&self, id: ObjectId) -> Option<Transform> {
        self.objects.get(&id).map(|o| o.transform)
    }

    /// Overwrites the world transform of a root object.
    ///
    /// For attached objects the value is overwritten again by the next
    /// [`Scene::sync_attachments`]; use [`Scene::set_local`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if the object does not exist.
    pub fn set_transform(&mut self, id: ObjectId, transform: Transform) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        object.transform = transform;
        Ok(())
    }

    /// Updates the local offset of an attached object.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if the object does not exist.
    /// Root objects have their world transform set instead.
    pub fn set_local(&mut self, id: ObjectId, local: Transform) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        match object.attachment.as_mut() {
            Some(attachment) => attachment.local = local,
            None => object.transform = local,
        }
        Ok(())
    }

    /// Attaches `child` to `parent` at offset `local`.
    ///
    /// Re-attaching an already attached child replaces its parent.
    ///
    /// # Errors
    ///
    /// - [`SceneError::UnknownObject`] if either object is missing
    /// - [`SceneError::SelfAttachment`] if `child == parent`
    /// - [`SceneError::AttachmentCycle`] if `parent` is a descendant of `child`
    pub fn attach(
        &mut self,
        child: ObjectId,
        parent: ObjectId,
        local: Transform,
    ) -> Result<(), SceneError> {
        if child == parent {
            return Err(SceneError::SelfAttachment(child));
        }
        if !self.contains(child) {
            return Err(SceneError::UnknownObject(child));
        }
        if !self.contains(parent) {
            return Err(SceneError::UnknownObject(parent));
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::AttachmentCycle { child, parent });
        }

        let world = self.resolve_world(parent) * local;
        if let Some(object) = self.objects.get_mut(&child) {
            object.attachment = Some(Attachment { parent, local });
            object.transform = world;
        }
        Ok(())
    }

    /// Detaches an object, keeping its current world transform.
    ///
    /// Detaching a root object is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::UnknownObject`] if the object does not exist.
    pub fn detach(&mut self, id: ObjectId) -> Result<(), SceneError> {
        let object = self
            .objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))?;
        object.attachment = None;
        Ok(())
    }

    /// Returns the parent of an attached object.
    #[must_use]
    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects
            .get(&id)
            .and_then(|o| o.attachment.map(|a| a.parent))
    }

    /// Recomputes world transforms of every attached object from its parent
    /// chain.
    pub fn sync_attachments(&mut self) {
        let updates: Vec<(ObjectId, Transform)> = self
            .objects
            .iter()
            .filter(|(_, o)| o.is_attached())
            .map(|(id, _)| (*id, self.resolve_world(*id)))
            .collect();

        for (id, world) in updates {
            if let Some(object) = self.objects.get_mut(&id) {
                object.transform = world;
            }
        }
    }

    /// World transform derived from the attachment chain.
    fn resolve_world(&self, id: ObjectId) -> Transform {
        let Some(object) = self.objects.get(&id) else {
            return Transform::IDENTITY;
        };
        match object.attachment {
            Some(attachment) if self.contains(attachment.parent) => {
                self.resolve_world(attachment.parent) * attachment.local
            }
            _ => object.transform,
        }
    }

    /// Whether `ancestor` appears in the parent chain of `id` (or is `id`).
    fn is_ancestor(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Casts a ray and returns the nearest hit within `max_distance` among
    /// objects whose layer intersects `layers`.
    ///
    /// Ties are broken by the lower object id.
    #[must_use]
    pub fn raycast(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<RayHit> {
        if ray.direction == Vec3::ZERO || max_distance <= 0.0 {
            return None;
        }

        let mut nearest: Option<RayHit> = None;
        for (id, object) in &self.objects {
            if !object.layer.intersects(layers) {
                continue;
            }
            let Some(collider) = &object.collider else {
                continue;
            };
            let Some(distance) = collider.intersect(&object.transform, ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if nearest.map_or(true, |best| distance < best.distance) {
                nearest = Some(RayHit {
                    object: *id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
        nearest
    }

    // -------------------------------------------------------------------------
    // Simulation
    // -------------------------------------------------------------------------

    /// Integrates every simulated, unattached body by `dt` seconds.
    ///
    /// Bodies fall under gravity and come to rest on the floor plane, where
    /// horizontal velocity decays with `ground_friction`.
    pub fn step(&mut self, dt: f32) {
        let gravity = self.config.gravity;
        let ground = self.config.ground_height;
        let damping = (1.0 - self.config.ground_friction * dt).max(0.0);

        for object in self.objects.values_mut() {
            if object.attachment.is_some() {
                continue;
            }
            let bottom = object.collider.map_or(0.0, |c| c.bottom_extent());
            let Some(body) = object.body.as_mut() else {
                continue;
            };
            if !body.is_simulated() {
                continue;
            }

            let mut velocity = body.velocity();
            if body.uses_gravity() {
                velocity += gravity * dt;
            }
            let mut position = object.transform.translation + velocity * dt;

            let rest_height = ground + bottom;
            if position.y <= rest_height {
                position.y = rest_height;
                velocity.y = velocity.y.max(0.0);
                velocity.x *= damping;
                velocity.z *= damping;
            }

            body.set_velocity(velocity);
            object.transform.translation = position;
        }
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::Collider;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    fn crate_at(scene: &mut Scene, position: Vec3, layer: LayerMask) -> ObjectId {
        scene.spawn(
            SceneObject::at(position)
                .with_collider(Collider::cuboid(Vec3::splat(0.5)))
                .with_layer(layer),
        )
    }

    #[test]
    fn ids_start_at_one_and_are_never_reused() {
        let mut scene = Scene::default();
        let a = scene.spawn(SceneObject::default());
        assert_eq!(a, ObjectId::new(1));
        scene.despawn(a);
        let b = scene.spawn(SceneObject::default());
        assert_eq!(b, ObjectId::new(2));
        assert!(scene.get(a).is_none());
    }

    #[test]
    fn raycast_returns_nearest_hit() {
        let mut scene = Scene::default();
        let far = crate_at(&mut scene, Vec3::new(0.0, 0.0, -6.0), LayerMask::INTERACTABLE);
        let near = crate_at(&mut scene, Vec3::new(0.0, 0.0, -3.0), LayerMask::INTERACTABLE);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.raycast(&ray, 10.0, LayerMask::INTERACTABLE).unwrap();

        assert_eq!(hit.object, near);
        assert_ne!(hit.object, far);
        assert!((hit.distance - 2.5).abs() < 1e-5);
        assert!((hit.point - Vec3::new(0.0, 0.0, -2.5)).length() < 1e-5);
    }

    #[test]
    fn raycast_respects_layer_filter() {
        let mut scene = Scene::default();
        let _wall = crate_at(&mut scene, Vec3::new(0.0, 0.0, -2.0), LayerMask::ENVIRONMENT);
        let target = crate_at(&mut scene, Vec3::new(0.0, 0.0, -4.0), LayerMask::INTERACTABLE);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let hit = scene.raycast(&ray, 10.0, LayerMask::INTERACTABLE).unwrap();
        assert_eq!(hit.object, target);

        let blocked = scene
            .raycast(&ray, 10.0, LayerMask::INTERACTABLE | LayerMask::ENVIRONMENT)
            .unwrap();
        assert_ne!(blocked.object, target);
    }

    #[test]
    fn raycast_respects_max_distance() {
        let mut scene = Scene::default();
        crate_at(&mut scene, Vec3::new(0.0, 0.0, -5.0), LayerMask::INTERACTABLE);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.raycast(&ray, 3.0, LayerMask::all()).is_none());
        assert!(scene.raycast(&ray, 4.5, LayerMask::all()).is_some());
    }

    #[test]
    fn objects_without_collider_are_invisible() {
        let mut scene = Scene::default();
        scene.spawn(SceneObject::at(Vec3::new(0.0, 0.0, -2.0)).with_layer(LayerMask::all()));
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(scene.raycast(&ray, 10.0, LayerMask::all()).is_none());
    }

    #[test]
    fn attach_rejects_self_and_cycles() {
        let mut scene = Scene::default();
        let a = scene.spawn(SceneObject::default());
        let b = scene.spawn(SceneObject::default());

        assert_eq!(
            scene.attach(a, a, Transform::IDENTITY),
            Err(SceneError::SelfAttachment(a))
        );
        scene.attach(b, a, Transform::IDENTITY).unwrap();
        assert_eq!(
            scene.attach(a, b, Transform::IDENTITY),
            Err(SceneError::AttachmentCycle { child: a, parent: b })
        );
    }

    #[test]
    fn attach_unknown_object_fails() {
        let mut scene = Scene::default();
        let a = scene.spawn(SceneObject::default());
        let ghost = ObjectId::new(99);
        assert_eq!(
            scene.attach(a, ghost, Transform::IDENTITY),
            Err(SceneError::UnknownObject(ghost))
        );
    }

    #[test]
    fn sync_propagates_through_chain() {
        let mut scene = Scene::default();
        let body = scene.spawn(SceneObject::default());
        let head = scene.spawn(SceneObject::default());
        let hand = scene.spawn(SceneObject::default());
        scene
            .attach(head, body, Transform::from_translation(Vec3::new(0.0, 1.6, 0.0)))
            .unwrap();
        scene
            .attach(hand, head, Transform::from_translation(Vec3::new(0.0, 0.0, -1.0)))
            .unwrap();

        scene
            .set_transform(
                body,
                Transform::new(Vec3::new(2.0, 0.0, 0.0), Quat::from_rotation_y(FRAC_PI_2)),
            )
            .unwrap();
        scene.sync_attachments();

        let hand_world = scene.transform(hand).unwrap();
        assert!((hand_world.translation - Vec3::new(1.0, 1.6, 0.0)).length() < 1e-5);
    }

    #[test]
    fn detach_keeps_world_transform() {
        let mut scene = Scene::default();
        let parent = scene.spawn(SceneObject::at(Vec3::new(0.0, 2.0, 0.0)));
        let child = scene.spawn(SceneObject::default());
        scene
            .attach(child, parent, Transform::from_translation(Vec3::X))
            .unwrap();
        scene.detach(child).unwrap();

        assert_eq!(scene.parent(child), None);
        assert_eq!(scene.transform(child).unwrap().translation, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn despawning_parent_detaches_children() {
        let mut scene = Scene::default();
        let parent = scene.spawn(SceneObject::at(Vec3::Y));
        let child = scene.spawn(SceneObject::default());
        scene.attach(child, parent, Transform::IDENTITY).unwrap();

        scene.despawn(parent);
        assert!(scene.contains(child));
        assert_eq!(scene.parent(child), None);
    }

    #[test]
    fn spawn_with_invalid_attachment_becomes_root() {
        let mut scene = Scene::default();
        let mut object = SceneObject::default();
        object.attachment = Some(Attachment {
            parent: ObjectId::new(42),
            local: Transform::IDENTITY,
        });
        let id = scene.spawn(object);
        assert_eq!(scene.parent(id), None);
    }

    #[test]
    fn spawn_attached_places_child() {
        let mut scene = Scene::default();
        let parent = scene.spawn(SceneObject::at(Vec3::new(1.0, 0.0, 0.0)));
        let child = scene.spawn(
            SceneObject::default()
                .attached_to(parent, Transform::from_translation(Vec3::new(0.0, 2.0, 0.0))),
        );
        assert_eq!(scene.parent(child), Some(parent));
        assert_eq!(scene.transform(child).unwrap().translation, Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn step_drops_body_to_floor() {
        let mut scene = Scene::default();
        let id = scene.spawn(
            SceneObject::at(Vec3::new(0.0, 3.0, 0.0))
                .with_collider(Collider::cuboid(Vec3::splat(0.25)))
                .with_body(RigidBody::default()),
        );

        for _ in 0..240 {
            scene.step(1.0 / 60.0);
        }

        let y = scene.transform(id).unwrap().translation.y;
        assert!((y - 0.25).abs() < 1e-5);
        assert_eq!(scene.tick(), 240);
    }

    #[test]
    fn step_skips_kinematic_and_attached_bodies() {
        let mut scene = Scene::default();
        let mut body = RigidBody::default();
        body.set_kinematic(true);
        let kinematic = scene.spawn(SceneObject::at(Vec3::new(0.0, 3.0, 0.0)).with_body(body));

        let anchor = scene.spawn(SceneObject::at(Vec3::new(0.0, 5.0, 0.0)));
        let carried = scene.spawn(SceneObject::default().with_body(RigidBody::default()));
        scene.attach(carried, anchor, Transform::IDENTITY).unwrap();

        scene.step(0.5);

        assert_eq!(scene.transform(kinematic).unwrap().translation.y, 3.0);
        assert_eq!(scene.transform(carried).unwrap().translation.y, 5.0);
    }

    #[test]
    fn body_without_gravity_keeps_velocity() {
        let mut scene = Scene::default();
        let mut body = RigidBody::default();
        body.set_use_gravity(false);
        body.set_velocity(Vec3::new(0.0, 0.0, -2.0));
        let id = scene.spawn(SceneObject::at(Vec3::new(0.0, 1.0, 0.0)).with_body(body));

        scene.step(0.5);

        let object = scene.get(id).unwrap();
        assert_eq!(object.transform.translation, Vec3::new(0.0, 1.0, -1.0));
        assert_eq!(object.body.as_ref().unwrap().velocity(), Vec3::new(0.0, 0.0, -2.0));
    }
}
