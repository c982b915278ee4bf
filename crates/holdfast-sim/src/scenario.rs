//! Scenario files.
//!
//! A scenario describes the world to build, the player spawn, and a script
//! of input changes keyed by tick:
//!
//! ```json
//! {
//!   "ticks": 120,
//!   "objects": [
//!     { "kind": "pickable_box", "position": [0.0, 1.6, -2.0] }
//!   ],
//!   "script": [
//!     { "tick": 1, "actions": ["interact"] },
//!     { "tick": 10, "actions": ["primary"] }
//!   ]
//! }
//! ```

use std::path::Path;

use anyhow::{ensure, Context, Result};
use glam::{Vec2, Vec3};
use holdfast_core::config::ControllerConfig;
use holdfast_core::input::{Action, InputReader};
use holdfast_core::objects::{ColorChangerBox, Flashlight, Lamp, ObjectBehavior, PickableBox};
use holdfast_scene::{Collider, LayerMask, RigidBody, SceneConfig, SceneObject};
use serde::{Deserialize, Serialize};

fn default_dt() -> f32 {
    1.0 / 60.0
}

fn default_ticks() -> u64 {
    120
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.25)
}

fn default_true() -> bool {
    true
}

/// A complete scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Player tuning.
    #[serde(default)]
    pub config: ControllerConfig,
    /// Scene physics settings.
    #[serde(default)]
    pub scene: SceneConfig,
    /// Fixed timestep (s).
    #[serde(default = "default_dt")]
    pub dt: f32,
    /// Ticks to run unless overridden on the command line.
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Player feet position.
    #[serde(default)]
    pub player_position: Vec3,
    /// World objects.
    #[serde(default)]
    pub objects: Vec<ObjectSpec>,
    /// Input script.
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

impl Scenario {
    /// Parses and validates a scenario.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenario: Self = serde_json::from_str(json).context("malformed scenario")?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reads, parses and validates a scenario file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        self.config.validate()?;
        ensure!(self.dt > 0.0, "dt must be positive, got {}", self.dt);
        Ok(())
    }

    /// Script steps scheduled for `tick`.
    pub fn steps_at(&self, tick: u64) -> impl Iterator<Item = &ScriptStep> {
        self.script.iter().filter(move |step| step.tick == tick)
    }
}

/// Behavior of a scenario object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectKind {
    /// Carryable box with a lid.
    PickableBox {
        /// Prompt override.
        #[serde(default)]
        prompt: Option<String>,
    },
    /// Box that recolours itself.
    ColorChangerBox {
        /// Colour sequence seed.
        #[serde(default)]
        seed: u64,
    },
    /// Switchable lamp.
    Lamp {
        /// Initial state.
        #[serde(default)]
        lit: bool,
    },
    /// Carryable flashlight.
    Flashlight,
    /// Collider with no behavior.
    Scenery,
}

/// One object to spawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    /// Behavior.
    #[serde(flatten)]
    pub kind: ObjectKind,
    /// Centre position.
    pub position: Vec3,
    /// Box half extents.
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
    /// Whether the object carries a rigid body.
    #[serde(default = "default_true")]
    pub dynamic: bool,
}

impl ObjectSpec {
    /// Scene-side description.
    pub fn scene_object(&self) -> SceneObject {
        let layer = match self.kind {
            ObjectKind::Scenery => LayerMask::ENVIRONMENT,
            _ => LayerMask::INTERACTABLE,
        };
        let object = SceneObject::at(self.position)
            .with_collider(Collider::cuboid(self.half_extents))
            .with_layer(layer);
        if self.dynamic {
            object.with_body(RigidBody::default())
        } else {
            object
        }
    }

    /// Behavior, if the object has one.
    pub fn behavior(&self) -> Option<ObjectBehavior> {
        let behavior: ObjectBehavior = match &self.kind {
            ObjectKind::PickableBox { prompt } => {
                let mut pickable = PickableBox::new();
                if let Some(prompt) = prompt {
                    pickable = pickable.with_prompt(prompt.clone());
                }
                pickable.into()
            }
            ObjectKind::ColorChangerBox { seed } => ColorChangerBox::new(*seed).into(),
            ObjectKind::Lamp { lit } => Lamp::new(*lit).into(),
            ObjectKind::Flashlight => Flashlight::new().into(),
            ObjectKind::Scenery => return None,
        };
        Some(behavior)
    }
}

/// Input changes applied at the start of one tick.
///
/// Unset axes and modifiers keep their previous value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptStep {
    /// Tick the step applies to (0-based).
    pub tick: u64,
    /// Discrete actions performed this tick.
    pub actions: Vec<Action>,
    /// New movement axis.
    #[serde(rename = "move")]
    pub move_axis: Option<Vec2>,
    /// New look axis.
    pub look: Option<Vec2>,
    /// New sprint modifier.
    pub sprint: Option<bool>,
}

impl ScriptStep {
    /// Applies the step to `input`.
    pub fn apply(&self, input: &mut InputReader) {
        if let Some(axis) = self.move_axis {
            input.set_move(axis);
        }
        if let Some(axis) = self.look {
            input.set_look(axis);
        }
        if let Some(sprint) = self.sprint {
            input.set_sprinting(sprint);
        }
        for &action in &self.actions {
            input.perform(action);
        }
    }
}
