//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add case-handling context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("case directory not found: {0}")]
    CasesDirNotFound(PathBuf),

    #[error("case file name must look like <number>_<label>.txt: {0}")]
    InvalidCaseName(PathBuf),

    #[error("case number {number} used twice: {first} and {second}")]
    DuplicateCaseNumber {
        number: u32,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("case not found: {0}")]
    CaseNotFound(u32),

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ApplicationError {
    /// True when the case folder itself is unusable.
    pub fn is_folder_error(&self) -> bool {
        matches!(
            self,
            ApplicationError::CasesDirNotFound(_)
                | ApplicationError::InvalidCaseName(_)
                | ApplicationError::DuplicateCaseNumber { .. }
        )
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
