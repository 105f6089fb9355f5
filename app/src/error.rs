//! Application error handling
//!
//! This module provides unified error handling for the app crate,
//! converting internal errors to user-facing notices.

use crate::notice::Notice;
use focusup_shared::AppError;
use thiserror::Error;
use tracing::{debug, error};

/// Error type returned by services and the persistence layer
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl TrackerError {
    /// Stable machine-readable code for the error
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::App(err) => err.code(),
            TrackerError::Io(_) => "IO_ERROR",
            TrackerError::Serialization(_) => "SERIALIZATION_ERROR",
            TrackerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Missing records are no-ops, not failures
    pub fn is_silent(&self) -> bool {
        matches!(self, TrackerError::App(err) if err.is_silent())
    }

    /// Notice to show the user, or `None` for silent errors
    pub fn notice(&self) -> Option<Notice> {
        if self.is_silent() {
            debug!(code = self.code(), "Ignoring missing record: {}", self);
            return None;
        }

        let message = match self {
            TrackerError::App(AppError::Validation(msg))
            | TrackerError::App(AppError::Format(msg)) => msg.clone(),
            TrackerError::App(AppError::Parse(_)) => "Could not read the file".to_string(),
            TrackerError::Internal(err) => {
                error!("Internal error: {:?}", err);
                "An internal error occurred".to_string()
            }
            other => {
                error!(code = other.code(), "{}", other);
                other.to_string()
            }
        };
        Some(Notice::error(message))
    }

    /// Process exit status for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            _ if self.is_silent() => 0,
            TrackerError::App(AppError::Validation(_)) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for services
pub type TrackerResult<T> = Result<T, TrackerError>;
