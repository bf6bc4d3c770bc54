//! Runtime error types.

use thiserror::Error;

use crate::config::ConfigError;
use tessera_core::VersionError;
use tessera_framework::SettingsError;

/// Errors that can occur while starting or reloading the runtime.
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration could not be loaded or is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The host version could not be detected. Resolution cannot start.
    #[error("Unsupported host: {0}")]
    Version(#[from] VersionError),

    /// Rendering settings were rejected.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// `RuntimeBuilder::build` was called without a host.
    #[error("No host was given to the runtime builder")]
    MissingHost,
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
