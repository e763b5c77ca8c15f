//! # Host Error Types
//!
//! Everything the host layer can fail on. The engine itself never fails.

use std::path::PathBuf;

use fluxfx_render::SurfaceError;
use thiserror::Error;

/// Errors raised by the host layer.
#[derive(Error, Debug)]
pub enum HostError {
    /// The settings file could not be read.
    #[error("failed to read settings from {path}: {source}")]
    SettingsIo {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML for [`crate::Settings`].
    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),

    /// No surface to draw on.
    #[error("surface error: {0}")]
    Surface(#[from] SurfaceError),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
