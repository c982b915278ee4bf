//! Error types for configuration and component setup.

use std::path::PathBuf;

use holdfast_scene::ObjectId;
use thiserror::Error;

/// Errors raised while loading or validating a
/// [`ControllerConfig`](crate::config::ControllerConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside its valid range.
    #[error("invalid config value `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value is rejected.
        reason: String,
    },
}

/// A required reference was missing when a component was initialised.
///
/// Setup errors are never fatal: the owning component logs the error and
/// stays inert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    /// No input source was provided.
    #[error("no input source assigned")]
    MissingInput,
    /// The scanner has no ray origin (camera/head anchor).
    #[error("no ray origin assigned")]
    MissingRayOrigin,
    /// The possession controller has no hold anchor.
    #[error("no hold anchor assigned")]
    MissingHoldAnchor,
    /// A referenced object does not exist in the scene.
    #[error("referenced object {0} does not exist")]
    UnknownObject(ObjectId),
}
