//! Interaction scanner.
//!
//! Once per tick the scanner casts a ray from its ray-origin object along
//! that object's forward axis and resolves the interactable candidate:
//!
//! | Ray result | Candidate | Prompt |
//! |------------|-----------|--------|
//! | miss | cleared | hidden |
//! | hit without Interactable | cleared | hidden |
//! | hit, status refuses | cleared | hidden |
//! | hit, status accepts | hit object | shown with status message |
//!
//! Interact events are dispatched by [`dispatch_interact`] against whatever
//! candidate the last scan left behind. The candidate is re-checked against
//! the object table at dispatch time, so an object despawned in between is
//! skipped.

use holdfast_scene::{LayerMask, ObjectId, Ray, RayHit, Scene};
use tracing::{debug, error, warn};

use crate::config::InteractionConfig;
use crate::error::SetupError;
use crate::interaction::{HandStatusListener, Interactor};
use crate::prompt::{Prompt, PromptSurface, TextPanel};
use crate::world::ObjectTable;

/// Nearest-hit ray query.
pub trait RayCaster {
    /// Returns the nearest hit within `max_distance` on `layers`.
    fn cast_ray(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<RayHit>;
}

impl RayCaster for Scene {
    fn cast_ray(&self, ray: &Ray, max_distance: f32, layers: LayerMask) -> Option<RayHit> {
        self.raycast(ray, max_distance, layers)
    }
}

/// Result of one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The scanner is disabled.
    Disabled,
    /// The ray hit nothing.
    Miss,
    /// The ray hit an object without the Interactable capability.
    NotInteractable(ObjectId),
    /// The ray hit an interactable that currently refuses interaction.
    Refused(ObjectId),
    /// The ray hit an interactable that accepts interaction.
    Candidate(ObjectId),
}

/// Raycast-based interactable scanner driving a prompt.
#[derive(Debug)]
pub struct InteractionScanner<S = TextPanel> {
    range: f32,
    layers: LayerMask,
    ray_origin: Option<ObjectId>,
    enabled: bool,
    hand_full: bool,
    candidate: Option<ObjectId>,
    last_hit: Option<RayHit>,
    prompt: Prompt<S>,
}

impl<S: PromptSurface> InteractionScanner<S> {
    /// Creates a scanner.
    ///
    /// A missing ray origin (unset, or not present in `scene`) is logged and
    /// leaves the scanner disabled.
    pub fn new(
        config: &InteractionConfig,
        ray_origin: Option<ObjectId>,
        surface: Option<S>,
        scene: &Scene,
    ) -> Self {
        let mut scanner = Self {
            range: config.range,
            layers: config.layers,
            ray_origin,
            enabled: true,
            hand_full: false,
            candidate: None,
            last_hit: None,
            prompt: Prompt::new(surface),
        };
        if let Err(err) = Self::check_origin(ray_origin, scene) {
            error!(error = %err, "interaction scanner disabled");
            scanner.enabled = false;
        }
        scanner
    }

    fn check_origin(ray_origin: Option<ObjectId>, scene: &Scene) -> Result<(), SetupError> {
        match ray_origin {
            None => Err(SetupError::MissingRayOrigin),
            Some(id) if !scene.contains(id) => Err(SetupError::UnknownObject(id)),
            Some(_) => Ok(()),
        }
    }

    /// Scans from the ray origin's current world transform.
    ///
    /// If the ray origin has disappeared from the scene the scanner disables
    /// itself.
    pub fn scan(&mut self, scene: &Scene, objects: &ObjectTable) -> ScanOutcome {
        if !self.enabled {
            return ScanOutcome::Disabled;
        }
        let Some(transform) = self.ray_origin.and_then(|id| scene.transform(id)) else {
            warn!(origin = ?self.ray_origin, "ray origin vanished; interaction scanner disabled");
            self.disable();
            return ScanOutcome::Disabled;
        };
        let ray = Ray::new(transform.translation, transform.forward());
        self.scan_ray(&ray, scene, objects)
    }

    /// Scans along an explicit ray.
    pub fn scan_ray(
        &mut self,
        ray: &Ray,
        caster: &impl RayCaster,
        objects: &ObjectTable,
    ) -> ScanOutcome {
        if !self.enabled {
            return ScanOutcome::Disabled;
        }

        self.last_hit = caster.cast_ray(ray, self.range, self.layers);
        let Some(hit) = self.last_hit else {
            self.clear();
            return ScanOutcome::Miss;
        };

        let Some(interactable) = objects.interactable(hit.object) else {
            self.clear();
            return ScanOutcome::NotInteractable(hit.object);
        };

        let status = interactable.interaction_status(self.hand_full);
        if status.can_interact {
            if self.candidate != Some(hit.object) {
                debug!(object = %hit.object, distance = hit.distance, "new interaction candidate");
            }
            self.candidate = Some(hit.object);
            self.prompt.show(true, &status.prompt_message);
            ScanOutcome::Candidate(hit.object)
        } else {
            self.clear();
            ScanOutcome::Refused(hit.object)
        }
    }

    fn clear(&mut self) {
        self.candidate = None;
        self.prompt.hide();
    }

    /// Stops scanning, clears the candidate and hides the prompt.
    pub fn disable(&mut self) {
        self.enabled = false;
        self.last_hit = None;
        self.clear();
    }

    /// Current candidate.
    #[must_use]
    pub fn candidate(&self) -> Option<ObjectId> {
        self.candidate
    }

    /// Whether the scanner is running.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Hand state last reported through [`HandStatusListener`].
    #[must_use]
    pub fn hand_is_full(&self) -> bool {
        self.hand_full
    }

    /// Most recent ray hit, for diagnostics.
    #[must_use]
    pub fn last_hit(&self) -> Option<RayHit> {
        self.last_hit
    }

    /// The prompt driver.
    #[must_use]
    pub fn prompt(&self) -> &Prompt<S> {
        &self.prompt
    }

    /// Maximum ray length.
    #[must_use]
    pub fn range(&self) -> f32 {
        self.range
    }
}

impl<S> HandStatusListener for InteractionScanner<S> {
    fn set_hand_status(&mut self, is_full: bool) {
        self.hand_full = is_full;
    }
}

/// Invokes `interact` on the candidate, if it still exists and is
/// interactable. Returns whether an interaction ran.
pub fn dispatch_interact(
    candidate: Option<ObjectId>,
    objects: &mut ObjectTable,
    interactor: &mut dyn Interactor,
) -> bool {
    let Some(id) = candidate else {
        return false;
    };
    match objects.interactable_mut(id) {
        Some(interactable) => {
            debug!(object = %id, "interact");
            interactable.interact(id, interactor);
            true
        }
        None => {
            debug!(object = %id, "interaction candidate no longer exists; skipped");
            false
        }
    }
}
