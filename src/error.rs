//! Error types for peercheck operations.
//!
//! This module defines [`PeercheckError`], the error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Expected conditions in the package tree (unreadable manifests, broken
//!   symlinks, unparseable ranges) are never errors; they are recovered
//!   locally or surfaced as check results
//! - Use `PeercheckError` for preconditions and configuration problems
//! - Use `anyhow::Error` (via `PeercheckError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for peercheck operations.
#[derive(Debug, Error)]
pub enum PeercheckError {
    /// The dependency store root does not exist.
    #[error("Dependency store not found: {path}")]
    StoreNotFound { path: PathBuf },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PeercheckError {
    /// Process exit code for this error.
    ///
    /// A missing store is a fatal precondition with its own exit code so
    /// pipelines can tell it apart from peer dependency failures.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StoreNotFound { .. } => 2,
            _ => 1,
        }
    }
}

/// Result type alias for peercheck operations.
pub type Result<T> = std::result::Result<T, PeercheckError>;
