//! Possession controller.
//!
//! Holds zero or one object. Picking up attaches the object to the hold
//! anchor and switches its body to kinematic; dropping detaches it and hands
//! it back to the simulation, optionally with a throw impulse along the
//! camera's forward axis.
//!
//! The held object id and its body handle live together in
//! [`HeldObject`], so they are always set and cleared as one.
//!
//! Every state change is reported to a [`HandStatusListener`] (normally the
//! interaction scanner).

use glam::Vec3;
use holdfast_scene::{Interpolation, ObjectId, Scene, Transform};
use tracing::{debug, error, info, warn};

use crate::error::SetupError;
use crate::interaction::{HandStatusListener, Interactor};
use crate::world::ObjectTable;

/// Handle to the rigid body of a held object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(ObjectId);

impl BodyHandle {
    /// Object owning the body.
    #[must_use]
    pub const fn object(self) -> ObjectId {
        self.0
    }
}

/// The currently held object and its physics handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldObject {
    /// Held object.
    pub object: ObjectId,
    /// Body of the held object, if it had one at pickup.
    pub body: Option<BodyHandle>,
}

/// What a possession operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PossessionOutcome {
    /// The object is now held.
    PickedUp(ObjectId),
    /// The held object was released without a throw.
    Dropped(ObjectId),
    /// The held object was thrown.
    Thrown(ObjectId),
    /// The held object's primary use ran.
    Used(ObjectId),
    /// The held object's secondary use ran.
    SecondaryUsed(ObjectId),
    /// Nothing happened.
    Ignored,
}

/// Single-slot held-object model.
#[derive(Debug)]
pub struct PossessionController {
    owner: ObjectId,
    camera: Option<ObjectId>,
    hold_anchor: Option<ObjectId>,
    throw_force: f32,
    held: Option<HeldObject>,
    enabled: bool,
}

impl PossessionController {
    /// Creates a controller for `owner`.
    ///
    /// `camera` supplies the throw direction (the hold anchor's forward axis
    /// is used without one). A missing or unknown hold anchor is logged and
    /// leaves the controller disabled.
    pub fn new(
        owner: ObjectId,
        camera: Option<ObjectId>,
        hold_anchor: Option<ObjectId>,
        throw_force: f32,
        scene: &Scene,
    ) -> Self {
        let enabled = match hold_anchor {
            None => Err(SetupError::MissingHoldAnchor),
            Some(id) if !scene.contains(id) => Err(SetupError::UnknownObject(id)),
            Some(_) => Ok(()),
        }
        .map_err(|err| error!(error = %err, "possession controller disabled"))
        .is_ok();

        Self {
            owner,
            camera,
            hold_anchor,
            throw_force,
            held: None,
            enabled,
        }
    }

    /// Currently held object, if any.
    #[must_use]
    pub fn held_object(&self) -> Option<ObjectId> {
        self.held.map(|h| h.object)
    }

    /// Held object together with its body handle.
    #[must_use]
    pub fn held(&self) -> Option<HeldObject> {
        self.held
    }

    /// Whether an object is held.
    #[must_use]
    pub fn is_holding(&self) -> bool {
        self.held.is_some()
    }

    /// Whether the controller is active.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Object owning this controller.
    #[must_use]
    pub fn owner(&self) -> ObjectId {
        self.owner
    }

    /// Picks up `object`.
    ///
    /// No-op while disabled, while already holding, or if `object` does not
    /// exist or cannot be attached to the hold anchor.
    pub fn pick_up(
        &mut self,
        scene: &mut Scene,
        object: ObjectId,
        listener: &mut dyn HandStatusListener,
    ) -> PossessionOutcome {
        if !self.enabled {
            return PossessionOutcome::Ignored;
        }
        if let Some(held) = self.held {
            debug!(held = %held.object, requested = %object, "hand already full; pickup ignored");
            return PossessionOutcome::Ignored;
        }
        let Some(anchor) = self.hold_anchor else {
            return PossessionOutcome::Ignored;
        };
        if !scene.contains(object) {
            return PossessionOutcome::Ignored;
        }

        if let Err(err) = scene.attach(object, anchor, Transform::IDENTITY) {
            warn!(object = %object, error = %err, "cannot attach to hold anchor; pickup ignored");
            return PossessionOutcome::Ignored;
        }

        let body = scene.body_mut(object).map(|body| {
            body.set_kinematic(true);
            body.set_use_gravity(false);
            body.set_interpolation(Interpolation::None);
            BodyHandle(object)
        });

        self.held = Some(HeldObject { object, body });
        listener.set_hand_status(true);
        info!(object = %object, "picked up");
        PossessionOutcome::PickedUp(object)
    }

    /// Releases the held object, throwing it if `throwing`.
    ///
    /// No-op when nothing is held.
    pub fn drop(
        &mut self,
        scene: &mut Scene,
        throwing: bool,
        listener: &mut dyn HandStatusListener,
    ) -> PossessionOutcome {
        let Some(held) = self.held else {
            return PossessionOutcome::Ignored;
        };

        let throw_direction = self.throw_direction(scene);
        if scene.detach(held.object).is_err() {
            debug!(object = %held.object, "held object vanished before drop");
        }

        if let Some(handle) = held.body {
            if let Some(body) = scene.body_mut(handle.object()) {
                body.set_kinematic(false);
                body.set_use_gravity(true);
                body.set_interpolation(Interpolation::Interpolate);
                if throwing {
                    body.apply_impulse(throw_direction * self.throw_force);
                } else {
                    body.set_velocity(Vec3::ZERO);
                }
            }
        }

        self.held = None;
        listener.set_hand_status(false);

        if throwing {
            info!(object = %held.object, force = self.throw_force, "thrown");
            PossessionOutcome::Thrown(held.object)
        } else {
            info!(object = %held.object, "dropped");
            PossessionOutcome::Dropped(held.object)
        }
    }

    fn throw_direction(&self, scene: &Scene) -> Vec3 {
        self.camera
            .or(self.hold_anchor)
            .and_then(|id| scene.transform(id))
            .map_or(Vec3::NEG_Z, |t| t.forward())
    }

    /// Primary action: use the held object if it is usable, otherwise throw
    /// it.
    pub fn primary_action(
        &mut self,
        scene: &mut Scene,
        objects: &mut ObjectTable,
        listener: &mut dyn HandStatusListener,
    ) -> PossessionOutcome {
        let Some(held) = self.held else {
            return PossessionOutcome::Ignored;
        };
        if let Some(usable) = objects
            .get_mut(held.object)
            .and_then(|b| b.as_usable_mut())
        {
            usable.on_use();
            return PossessionOutcome::Used(held.object);
        }
        self.drop(scene, true, listener)
    }

    /// Secondary action: start the held object's secondary use, if it has
    /// one.
    pub fn secondary_action(&mut self, objects: &mut ObjectTable) -> PossessionOutcome {
        let Some(held) = self.held else {
            return PossessionOutcome::Ignored;
        };
        match objects
            .get_mut(held.object)
            .and_then(|b| b.as_secondary_usable_mut())
        {
            Some(secondary) => {
                secondary.on_secondary_use_start();
                PossessionOutcome::SecondaryUsed(held.object)
            }
            None => PossessionOutcome::Ignored,
        }
    }

    /// Clears the held reference if the object was removed from the scene.
    ///
    /// Returns whether a stale reference was released.
    pub fn release_missing(
        &mut self,
        scene: &Scene,
        listener: &mut dyn HandStatusListener,
    ) -> bool {
        match self.held {
            Some(held) if !scene.contains(held.object) => {
                warn!(object = %held.object, "held object removed from world; hand emptied");
                self.held = None;
                listener.set_hand_status(false);
                true
            }
            _ => false,
        }
    }
}

/// [`Interactor`] backed by a possession controller.
///
/// Built on demand for the duration of one interaction so the interactable
/// can hand itself over through `pick_up_object`.
pub struct PossessionInteractor<'a> {
    possession: &'a mut PossessionController,
    scene: &'a mut Scene,
    listener: &'a mut dyn HandStatusListener,
}

impl<'a> PossessionInteractor<'a> {
    /// Borrows the pieces a pickup needs.
    pub fn new(
        possession: &'a mut PossessionController,
        scene: &'a mut Scene,
        listener: &'a mut dyn HandStatusListener,
    ) -> Self {
        Self {
            possession,
            scene,
            listener,
        }
    }
}

impl Interactor for PossessionInteractor<'_> {
    fn origin(&self) -> Vec3 {
        self.scene
            .transform(self.possession.owner)
            .map_or(Vec3::ZERO, |t| t.translation)
    }

    fn pick_up_object(&mut self, object: ObjectId) {
        self.possession.pick_up(self.scene, object, self.listener);
    }
}
