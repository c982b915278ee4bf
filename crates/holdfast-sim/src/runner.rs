//! Fixed-tick scenario runner.

use glam::Vec3;
use holdfast_core::controller::FirstPersonController;
use holdfast_core::input::InputReader;
use holdfast_core::objects::ObjectBehavior;
use holdfast_core::prompt::{PromptState, TextPanel};
use holdfast_core::world::World;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, info, info_span};

use crate::scenario::Scenario;

/// Final state of one object.
#[derive(Debug, Clone, Serialize)]
pub struct ObjectSummary {
    /// Object id.
    pub id: u64,
    /// Behavior kind, `null` for scenery.
    pub kind: Option<&'static str>,
    /// World position.
    pub position: Vec3,
    /// Whether the object is attached to another.
    pub attached: bool,
    /// Behavior-specific state.
    pub state: Value,
}

/// Final state of a run.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    /// Ticks executed.
    pub ticks: u64,
    /// Player feet position.
    pub player_position: Vec3,
    /// Body yaw (degrees).
    pub yaw: f32,
    /// Camera pitch (degrees).
    pub pitch: f32,
    /// Whether the player stands on the ground.
    pub grounded: bool,
    /// Held object id.
    pub held: Option<u64>,
    /// Interaction candidate id.
    pub candidate: Option<u64>,
    /// Last applied prompt.
    pub prompt: PromptState,
    /// Every scenario object.
    pub objects: Vec<ObjectSummary>,
}

/// Builds the world described by `scenario` and runs it for `ticks` (or the
/// scenario's own tick count).
pub fn run(scenario: &Scenario, ticks: Option<u64>) -> Summary {
    let ticks = ticks.unwrap_or(scenario.ticks);
    let mut world = World::new(scenario.scene.clone());
    let mut input = InputReader::new();
    let mut player = FirstPersonController::spawn(
        &mut world,
        &mut input,
        scenario.config.clone(),
        scenario.player_position,
        Some(TextPanel::default()),
    );

    let ids: Vec<_> = scenario
        .objects
        .iter()
        .map(|spec| match spec.behavior() {
            Some(behavior) => world.spawn_with(spec.scene_object(), behavior),
            None => world.spawn(spec.scene_object()),
        })
        .collect();
    info!(objects = ids.len(), ticks, dt = scenario.dt, "scenario loaded");

    for tick in 0..ticks {
        let _span = info_span!("tick", tick).entered();
        for step in scenario.steps_at(tick) {
            debug!(actions = ?step.actions, "script step");
            step.apply(&mut input);
        }
        player.tick(&mut world, &mut input, scenario.dt);
        world.step(scenario.dt);
    }

    let objects = ids
        .iter()
        .filter_map(|&id| {
            let scene_object = world.scene().get(id)?;
            let behavior = world.objects().get(id);
            Some(ObjectSummary {
                id: id.as_u64(),
                kind: behavior.map(ObjectBehavior::kind),
                position: scene_object.transform.translation,
                attached: scene_object.is_attached(),
                state: behavior.map_or(Value::Null, behavior_state),
            })
        })
        .collect();

    let summary = Summary {
        ticks,
        player_position: player.position(),
        yaw: player.locomotion().yaw(),
        pitch: player.locomotion().pitch(),
        grounded: player.is_grounded(),
        held: player.possession().held_object().map(|id| id.as_u64()),
        candidate: player.scanner().candidate().map(|id| id.as_u64()),
        prompt: player.scanner().prompt().state().clone(),
        objects,
    };
    info!(held = ?summary.held, candidate = ?summary.candidate, "scenario finished");
    summary
}

fn behavior_state(behavior: &ObjectBehavior) -> Value {
    match behavior {
        ObjectBehavior::PickableBox(b) => json!({ "open": b.is_open() }),
        ObjectBehavior::ColorChangerBox(b) => {
            let c = b.color();
            json!({ "color": [c.x, c.y, c.z], "changes": b.changes() })
        }
        ObjectBehavior::Lamp(l) => json!({ "lit": l.is_lit() }),
        ObjectBehavior::Flashlight(f) => json!({ "on": f.is_on() }),
        ObjectBehavior::Custom(_) => Value::Null,
    }
}
