//! Error types for shell configuration, mounting and module lifecycle.

use std::time::Duration;
use thiserror::Error;

use crate::handle::ModulePhase;

/// Errors raised while resolving the theme and capability configuration.
///
/// These are fatal at startup: the shell never continues half-configured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("Unknown theme preset: '{0}'")]
    UnknownPreset(String),

    #[error("Unknown capability: '{0}'")]
    UnknownCapability(String),

    #[error("Invalid identifier prefix: '{0}' (must be non-empty and contain no whitespace)")]
    InvalidPrefix(String),

    #[error("View '{view}' renders '{capability}' which was never registered")]
    MissingCapability { view: String, capability: String },
}

/// Errors raised when the root view cannot be attached to its target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("Invalid mount target: '{0}'")]
    InvalidTarget(String),

    #[error("Host is already mounted at '{target}'")]
    AlreadyMounted { target: String },

    #[error("Host rejected mount: {0}")]
    Rejected(String),
}

/// Terminal failure of the simulation module load.
///
/// Recorded in the [`crate::ModuleHandle`] rather than returned to the
/// caller that started the load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleLoadError {
    #[error("Module could not be loaded: {0}")]
    LoaderFailed(String),

    #[error("Module init() rejected: {0}")]
    InitRejected(String),

    #[error("Module panicked during load: {0}")]
    Panicked(String),

    #[error("Module load timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Module load was cancelled")]
    Cancelled,

    #[error("Module loader exited without reporting a result")]
    Disconnected,
}

/// Errors returned when calling into the simulation module.
#[derive(Debug, Error)]
pub enum ModuleCallError {
    #[error("Simulation module is not ready (state: {0})")]
    NotReady(ModulePhase),

    #[error("Simulation module failed to load: {0}")]
    LoadFailed(ModuleLoadError),

    #[error("Simulation call failed: {0:#}")]
    Call(#[from] anyhow::Error),
}

/// Errors surfaced by the bootstrap sequencer.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("Module load requested before the UI was mounted")]
    NotMounted,

    #[error("Module load already started (state: {0})")]
    AlreadyStarted(ModulePhase),
}

/// Errors reading a shell profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Failed to read profile {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),
}
