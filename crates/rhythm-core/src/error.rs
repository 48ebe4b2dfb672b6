//! Core error types for rhythm-core.
//!
//! Nothing in the session is fatal: sample validation errors are recovered
//! by clamping, and invalid commands are logged and dropped. Strict
//! constructors and the config layer return these types directly.

use std::path::PathBuf;
use thiserror::Error;

use crate::navigation::Screen;

/// Why a session command was ignored.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Navigation command issued in a state where it has no effect
    #[error("Transition error: {0}")]
    Transition(#[from] TransitionError),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A check-in field fell outside its declared range
    #[error("Invalid sample: {field} = {value} is outside [{min}, {max}]")]
    InvalidSample {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// Timers need at least one second to count down
    #[error("Invalid timer duration: {0} seconds")]
    InvalidDuration(u32),
}

/// Navigation errors. Always recovered as a logged no-op.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("'{command}' has no effect on screen '{screen}'")]
    InvalidTransition {
        command: &'static str,
        screen: Screen,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the config tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}
