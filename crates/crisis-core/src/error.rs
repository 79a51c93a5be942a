//! Error types for the simulation core.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the simulation core and its binaries.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Writing the event log or a snapshot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A log entry or snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for simulation operations.
pub type SimResult<T> = Result<T, SimError>;
