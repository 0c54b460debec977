//! Custom error types for the finance CLI
//!
//! This module defines the error hierarchy for the application using thiserror.
//! Field-scoped validation failures travel as a [`ValidationErrors`] map so the
//! caller can surface every problem at once; failures reported by the ledger
//! collaborator are wrapped as submission errors.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// The main error type for finance operations
#[derive(Error, Debug)]
pub enum FinanceError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Field-scoped validation failures; never sent to the ledger service
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// The session credential was missing or rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The ledger service failed to apply a submission
    #[error("{message}")]
    Submission {
        message: String,
        #[source]
        source: Box<FinanceError>,
    },

    /// A submission is already outstanding for this form
    #[error("A submission is already in progress for this form")]
    SubmissionInFlight,

    /// Transfers are created once and never edited
    #[error("Transfers cannot be edited; create a new transfer instead")]
    TransferEditUnsupported,
}

impl FinanceError {
    /// Create a "not found" error for accounts
    pub fn account_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Account",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for ledger entries
    pub fn entry_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Transaction",
            identifier: identifier.into(),
        }
    }

    /// Wrap a collaborator failure as a user-facing submission error
    pub fn submission(message: impl Into<String>, source: FinanceError) -> Self {
        Self::Submission {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a submission error
    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission { .. })
    }

    /// The field errors carried by a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl From<ValidationErrors> for FinanceError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<std::io::Error> for FinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for finance operations
pub type FinanceResult<T> = Result<T, FinanceError>;
