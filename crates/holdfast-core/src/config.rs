//! Controller configuration.
//!
//! All tuning values live in [`ControllerConfig`], grouped by the component
//! that reads them. Every section is `#[serde(default)]`, so a config file
//! only needs to list the values it overrides.
//!
//! # Example
//!
//! ```
//! use holdfast_core::config::ControllerConfig;
//!
//! let config = ControllerConfig::from_json_str(r#"{ "jump": { "jump_height": 2.0 } }"#).unwrap();
//! assert_eq!(config.jump.jump_height, 2.0);
//! assert_eq!(config.movement.walk_speed, 4.0);
//! ```

use std::path::Path;

use glam::Vec3;
use holdfast_scene::LayerMask;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Horizontal movement tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Walking speed (m/s).
    pub walk_speed: f32,
    /// Sprinting speed (m/s).
    pub sprint_speed: f32,
    /// Rate at which speed approaches its target (1/s).
    pub acceleration: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 4.0,
            sprint_speed: 8.0,
            acceleration: 10.0,
        }
    }
}

/// Mouse/stick look tuning. Angles are in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Degrees of yaw per unit of horizontal look input.
    pub sensitivity_x: f32,
    /// Degrees of pitch per unit of vertical look input.
    pub sensitivity_y: f32,
    /// Highest camera pitch (looking up).
    pub upper_limit: f32,
    /// Lowest camera pitch (looking down).
    pub lower_limit: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity_x: 0.3,
            sensitivity_y: 0.3,
            upper_limit: 80.0,
            lower_limit: -80.0,
        }
    }
}

/// Jump and gravity tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    /// Apex height of a jump (m).
    pub jump_height: f32,
    /// Vertical acceleration (m/s², negative is down).
    pub gravity: f32,
    /// Maximum falling speed (m/s, positive).
    pub terminal_velocity: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            jump_height: 1.2,
            gravity: -15.0,
            terminal_velocity: 53.0,
        }
    }
}

/// Interaction scan tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Maximum ray length (m).
    pub range: f32,
    /// Layers the scan ray considers.
    pub layers: LayerMask,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            range: 3.0,
            layers: LayerMask::INTERACTABLE,
        }
    }
}

/// Held-object tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoldConfig {
    /// Impulse magnitude applied along the camera forward axis on throw.
    pub throw_force: f32,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self { throw_force: 10.0 }
    }
}

/// Placement of the camera and hold anchor relative to the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigConfig {
    /// Camera height above the feet (m).
    pub eye_height: f32,
    /// Hold anchor offset in camera space. Kept off the view axis so a held
    /// object does not block the scan ray.
    pub hold_offset: Vec3,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            eye_height: 1.6,
            hold_offset: Vec3::new(0.35, -0.3, -0.8),
        }
    }
}

/// Complete configuration for a [`FirstPersonController`](crate::controller::FirstPersonController).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Horizontal movement.
    pub movement: MovementConfig,
    /// Look rotation.
    pub look: LookConfig,
    /// Jump and gravity.
    pub jump: JumpConfig,
    /// Interaction scan.
    pub interaction: InteractionConfig,
    /// Held objects.
    pub hold: HoldConfig,
    /// Camera and hold anchor placement.
    pub rig: RigConfig,
}

impl ControllerConfig {
    /// Parses and validates a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ControllerConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError::Invalid`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("movement.walk_speed", self.movement.walk_speed)?;
        non_negative("movement.sprint_speed", self.movement.sprint_speed)?;
        non_negative("movement.acceleration", self.movement.acceleration)?;

        if self.look.lower_limit > self.look.upper_limit {
            return Err(invalid(
                "look.lower_limit",
                format!(
                    "{} is above upper_limit {}",
                    self.look.lower_limit, self.look.upper_limit
                ),
            ));
        }

        non_negative("jump.jump_height", self.jump.jump_height)?;
        if self.jump.gravity.is_nan() || self.jump.gravity >= 0.0 {
            return Err(invalid(
                "jump.gravity",
                format!("{} must be negative", self.jump.gravity),
            ));
        }
        if self.jump.terminal_velocity.is_nan() || self.jump.terminal_velocity <= 0.0 {
            return Err(invalid(
                "jump.terminal_velocity",
                format!("{} must be positive", self.jump.terminal_velocity),
            ));
        }

        if self.interaction.range.is_nan() || self.interaction.range <= 0.0 {
            return Err(invalid(
                "interaction.range",
                format!("{} must be positive", self.interaction.range),
            ));
        }
        if self.interaction.layers.is_empty() {
            return Err(invalid("interaction.layers", "no layers selected".to_owned()));
        }

        non_negative("hold.throw_force", self.hold.throw_force)?;
        non_negative("rig.eye_height", self.rig.eye_height)?;
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}
