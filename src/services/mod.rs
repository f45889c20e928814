use thiserror::Error;

use crate::repository::RepositoryError;

pub mod board;
pub mod dashboard;
pub mod performance;
pub mod sales;
pub mod settings;
pub mod strategy;

/// Result type returned by every service function.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures a service call can surface to the presentation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A field-keyed validation message to render inline next to the
    /// offending input.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },
    /// A form-level failure that is not tied to a single field.
    #[error("{0}")]
    Form(String),
    /// Repository failures.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ServiceError {
    /// Build a field-keyed validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
