//! First-person controller.
//!
//! Composition root: owns the mover, [`LocomotionController`],
//! [`InteractionScanner`] and [`PossessionController`] for one player and
//! runs them in a fixed order each tick:
//!
//! 1. Release a held object that was removed from the world
//! 2. Drain discrete input (jump, primary, secondary, interact)
//! 3. Gravity and horizontal movement
//! 4. Look rotation
//! 5. Write body and camera transforms, then sync attachments
//! 6. Interaction scan
//!
//! Interaction goes through [`PossessionInteractor`], so interactables hand
//! themselves to the possession controller without knowing about the player.

use glam::Vec3;
use holdfast_scene::{KinematicMover, LayerMask, ObjectId, Scene, SceneObject, Transform};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::ControllerConfig;
use crate::error::SetupError;
use crate::input::{Action, InputReader, SubscriptionId};
use crate::locomotion::{CharacterMover, LocomotionController};
use crate::possession::{PossessionController, PossessionInteractor, PossessionOutcome};
use crate::prompt::{PromptSurface, TextPanel};
use crate::scanner::{dispatch_interact, InteractionScanner};
use crate::world::{ObjectTable, World};

/// Actions a first-person controller listens to.
pub const PLAYER_ACTIONS: [Action; 4] = [
    Action::Primary,
    Action::Secondary,
    Action::Interact,
    Action::Jump,
];

/// Scene objects making up a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRig {
    /// Body at the feet; carries yaw.
    pub body: ObjectId,
    /// Camera attached to the body; carries pitch and is the scan origin.
    pub camera_root: Option<ObjectId>,
    /// Hold anchor attached to the camera.
    pub hold_anchor: Option<ObjectId>,
}

/// A first-person player.
#[derive(Debug)]
pub struct FirstPersonController<S = TextPanel> {
    config: ControllerConfig,
    rig: PlayerRig,
    mover: Box<dyn CharacterMover>,
    locomotion: LocomotionController,
    scanner: InteractionScanner<S>,
    possession: PossessionController,
    subscription: Option<SubscriptionId>,
    enabled: bool,
}

impl<S: PromptSurface> FirstPersonController<S> {
    /// Spawns a player rig at `position` and builds its controller.
    ///
    /// Creates the body, a camera root attached at `rig.eye_height` and a
    /// hold anchor attached to the camera at `rig.hold_offset`.
    pub fn spawn(
        world: &mut World,
        input: &mut InputReader,
        config: ControllerConfig,
        position: Vec3,
        surface: Option<S>,
    ) -> Self {
        let body = world.spawn(SceneObject::at(position).with_layer(LayerMask::PLAYER));
        let camera_root = world.spawn(
            SceneObject::default()
                .with_layer(LayerMask::PLAYER)
                .attached_to(body, Transform::from_translation(Vec3::Y * config.rig.eye_height)),
        );
        let hold_anchor = world.spawn(
            SceneObject::default()
                .with_layer(LayerMask::PLAYER)
                .attached_to(camera_root, Transform::from_translation(config.rig.hold_offset)),
        );
        debug!(body = %body, camera = %camera_root, anchor = %hold_anchor, "player rig spawned");

        let rig = PlayerRig {
            body,
            camera_root: Some(camera_root),
            hold_anchor: Some(hold_anchor),
        };
        let mover = KinematicMover::new(position, world.scene().config().ground_height);
        Self::from_rig(world, Some(input), config, rig, Box::new(mover), surface)
    }

    /// Builds a controller around an existing rig.
    ///
    /// Missing references are logged and leave the affected part inert:
    /// no input disables the whole controller, no camera disables the
    /// scanner, no hold anchor disables possession.
    pub fn from_rig(
        world: &World,
        input: Option<&mut InputReader>,
        config: ControllerConfig,
        rig: PlayerRig,
        mover: Box<dyn CharacterMover>,
        surface: Option<S>,
    ) -> Self {
        let scene = world.scene();
        let scanner = InteractionScanner::new(&config.interaction, rig.camera_root, surface, scene);
        let possession = PossessionController::new(
            rig.body,
            rig.camera_root,
            rig.hold_anchor,
            config.hold.throw_force,
            scene,
        );

        let subscription = input.map(|input| input.subscribe(&PLAYER_ACTIONS));
        let enabled = if subscription.is_some() {
            true
        } else {
            error!(error = %SetupError::MissingInput, "first-person controller disabled");
            false
        };

        Self {
            config,
            rig,
            mover,
            locomotion: LocomotionController::default(),
            scanner,
            possession,
            subscription,
            enabled,
        }
    }

    /// Runs one fixed tick.
    pub fn tick(&mut self, world: &mut World, input: &mut InputReader, dt: f32) {
        if !self.enabled {
            return;
        }
        let (scene, objects) = world.split_mut();

        self.possession.release_missing(scene, &mut self.scanner);

        let events = self
            .subscription
            .map(|id| input.drain(id))
            .unwrap_or_default();
        for action in events {
            self.handle_action(action, scene, objects);
        }

        let state = *input.state();
        self.locomotion
            .apply_gravity(self.mover.as_ref(), &self.config.jump, dt);
        self.locomotion.apply_movement(
            self.mover.as_mut(),
            &self.config.movement,
            state.move_axis,
            state.sprinting,
            dt,
        );
        self.locomotion.apply_rotation(&self.config.look, state.look_axis);

        self.write_transforms(scene);
        scene.sync_attachments();

        self.scanner.scan(scene, objects);
    }

    fn handle_action(&mut self, action: Action, scene: &mut Scene, objects: &mut ObjectTable) {
        match action {
            Action::Jump => {
                self.locomotion.jump(self.mover.as_ref(), &self.config.jump);
            }
            Action::Primary => {
                let outcome = self.possession.primary_action(scene, objects, &mut self.scanner);
                log_outcome(action, outcome);
            }
            Action::Secondary => {
                let outcome = self.possession.secondary_action(objects);
                log_outcome(action, outcome);
            }
            Action::Interact => {
                let candidate = self.scanner.candidate();
                let mut interactor =
                    PossessionInteractor::new(&mut self.possession, scene, &mut self.scanner);
                dispatch_interact(candidate, objects, &mut interactor);
            }
        }
    }

    fn write_transforms(&self, scene: &mut Scene) {
        let body = Transform::new(self.mover.position(), self.locomotion.body_rotation());
        if let Err(err) = scene.set_transform(self.rig.body, body) {
            debug!(error = %err, "player body missing");
        }
        if let Some(camera) = self.rig.camera_root {
            let local = Transform::new(
                Vec3::Y * self.config.rig.eye_height,
                self.locomotion.camera_rotation(),
            );
            if let Err(err) = scene.set_local(camera, local) {
                debug!(error = %err, "camera root missing");
            }
        }
    }

    /// Enables or disables the controller, subscribing to or unsubscribing
    /// from `input` accordingly.
    pub fn set_enabled(&mut self, input: &mut InputReader, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        if enabled {
            self.subscription = Some(input.subscribe(&PLAYER_ACTIONS));
        } else if let Some(id) = self.subscription.take() {
            input.unsubscribe(id);
        }
        self.enabled = enabled;
        debug!(enabled, "first-person controller toggled");
    }

    /// Whether the controller runs on tick.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The interaction scanner.
    #[must_use]
    pub fn scanner(&self) -> &InteractionScanner<S> {
        &self.scanner
    }

    /// The possession controller.
    #[must_use]
    pub fn possession(&self) -> &PossessionController {
        &self.possession
    }

    /// The locomotion state.
    #[must_use]
    pub fn locomotion(&self) -> &LocomotionController {
        &self.locomotion
    }

    /// The rig objects.
    #[must_use]
    pub fn rig(&self) -> PlayerRig {
        self.rig
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Feet position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.mover.position()
    }

    /// Whether the mover rests on the ground.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        self.mover.is_grounded()
    }
}

fn log_outcome(action: Action, outcome: PossessionOutcome) {
    if outcome != PossessionOutcome::Ignored {
        debug!(?action, ?outcome, "possession action");
    }
}
