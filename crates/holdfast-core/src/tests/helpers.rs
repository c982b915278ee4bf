//! Test setup helpers.

use glam::Vec3;
use holdfast_scene::{Collider, LayerMask, ObjectId, RigidBody, SceneObject};

use crate::config::ControllerConfig;
use crate::controller::FirstPersonController;
use crate::input::{Action, InputReader};
use crate::objects::{ObjectBehavior, PickableBox};
use crate::prompt::TextPanel;
use crate::world::World;

/// Fixed tick used by the scenarios.
pub const DT: f32 = 1.0 / 60.0;

/// Camera height of the default rig.
pub const EYE: f32 = 1.6;

// =============================================================================
// Setup
// =============================================================================

/// World, input and a default player at the origin facing `-Z`.
pub struct Harness {
    pub world: World,
    pub input: InputReader,
    pub player: FirstPersonController,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(ControllerConfig::default())
    }

    pub fn with_config(config: ControllerConfig) -> Self {
        let mut world = World::default();
        let mut input = InputReader::new();
        let player = FirstPersonController::spawn(
            &mut world,
            &mut input,
            config,
            Vec3::ZERO,
            Some(TextPanel::default()),
        );
        Self {
            world,
            input,
            player,
        }
    }

    /// Runs one tick.
    pub fn tick(&mut self) {
        self.player.tick(&mut self.world, &mut self.input, DT);
    }

    /// Runs `n` ticks.
    pub fn run(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    /// Performs `action` and runs one tick to consume it.
    pub fn press(&mut self, action: Action) {
        self.input.perform(action);
        self.tick();
    }

    /// The player's prompt panel.
    pub fn panel(&self) -> &TextPanel {
        self.player
            .scanner()
            .prompt()
            .surface()
            .expect("harness player has a panel")
    }

    /// Spawns `behavior` as a dynamic box at eye level, `distance` ahead.
    pub fn spawn_ahead(&mut self, distance: f32, behavior: impl Into<ObjectBehavior>) -> ObjectId {
        spawn_box(&mut self.world, Vec3::new(0.0, EYE, -distance), behavior)
    }

    /// Spawns a pickable box off to the right, outside the view ray.
    pub fn spawn_box_aside(&mut self) -> ObjectId {
        spawn_box(&mut self.world, Vec3::new(3.0, EYE, -2.0), PickableBox::new())
    }
}

/// Spawns an interactable dynamic box (half extent 0.25) at `position`.
pub fn spawn_box(
    world: &mut World,
    position: Vec3,
    behavior: impl Into<ObjectBehavior>,
) -> ObjectId {
    world.spawn_with(box_object(position), behavior)
}

/// Scene object for a 0.5 m interactable box with a unit-mass body.
pub fn box_object(position: Vec3) -> SceneObject {
    SceneObject::at(position)
        .with_collider(Collider::cuboid(Vec3::splat(0.25)))
        .with_layer(LayerMask::INTERACTABLE)
        .with_body(RigidBody::default())
}
