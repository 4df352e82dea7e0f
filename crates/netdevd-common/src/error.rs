//! Error types for device operations.
//!
//! All errors implement `std::error::Error` via `thiserror`. Configuration
//! problems never surface here: the config layer degrades bad fields to
//! defaults and reports warnings instead. These errors cover lifecycle and
//! system interaction only.

use std::io;
use thiserror::Error;

/// Result type alias for device operations.
pub type DevResult<T> = Result<T, DevError>;

/// Errors that can occur while operating a managed device.
#[derive(Debug, Error)]
pub enum DevError {
    /// The parent device is missing, not present, or cannot be claimed.
    #[error("Parent device '{parent}' unavailable")]
    ParentUnavailable {
        /// The parent device name (or the sub-device name when no parent
        /// was configured at all).
        parent: String,
    },

    /// Failed to execute a shell command (spawn error).
    #[error("Failed to execute shell command '{command}': {source}")]
    ShellExec {
        /// The command that failed to execute.
        command: String,
        /// The underlying IO error.
        #[source]
        source: io::Error,
    },

    /// Shell command returned non-zero exit code.
    #[error("Shell command failed: '{command}' (exit code {exit_code}): {output}")]
    ShellCommandFailed {
        /// The command that failed.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout/stderr output.
        output: String,
    },

    /// Live system information for a device could not be read.
    #[error("Failed to read link info for '{device}': {message}")]
    LinkInfo {
        /// The device name.
        device: String,
        /// Error message.
        message: String,
    },

    /// Internal error (unexpected state).
    #[error("Internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl DevError {
    /// Creates a parent-unavailable error.
    pub fn parent_unavailable(parent: impl Into<String>) -> Self {
        Self::ParentUnavailable {
            parent: parent.into(),
        }
    }

    /// Creates a link-info error.
    pub fn link_info(device: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LinkInfo {
            device: device.into(),
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates a transient condition
    /// that may succeed on retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DevError::ParentUnavailable { .. } | DevError::ShellCommandFailed { .. }
        )
    }
}
