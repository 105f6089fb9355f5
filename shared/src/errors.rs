//! Error types for the FocusUp tracker

use thiserror::Error;

/// Core error kinds reported by the task store, validation and import code
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required field is empty or out of range. No state was changed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The referenced record is no longer present
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persisted or imported content is not valid JSON
    #[error("Parse error: {0}")]
    Parse(String),

    /// Content parsed but does not have a recognized shape
    #[error("Format error: {0}")]
    Format(String),

    /// The blob store rejected a read or write
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    /// Stable machine-readable code for the error kind
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Format(_) => "FORMAT_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Not-found errors are treated as silent no-ops by callers
    pub fn is_silent(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            AppError::Format(err.to_string())
        } else {
            AppError::Parse(err.to_string())
        }
    }
}

/// Result alias for core operations
pub type AppResult<T> = Result<T, AppError>;
