//! Estimation-specific error types.

use super::EstimationState;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, ValidationError};

/// Errors raised by estimation session operations.
///
/// Domain operations only ever produce `InvalidTransition` or
/// `InvalidInput`; the other variants come from the application layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimationError {
    /// Session was not found.
    #[error("Session not found: {0}")]
    NotFound(SessionId),

    /// Operation is illegal in the current lifecycle state.
    #[error("Cannot {action} while {state}: {reason}")]
    InvalidTransition {
        state: EstimationState,
        action: &'static str,
        reason: String,
    },

    /// Malformed argument.
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    /// Storage or other infrastructure failure.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl EstimationError {
    pub fn not_found(id: SessionId) -> Self {
        EstimationError::NotFound(id)
    }

    pub fn invalid_transition(
        state: EstimationState,
        action: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        EstimationError::InvalidTransition {
            state,
            action,
            reason: reason.into(),
        }
    }

    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EstimationError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        EstimationError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            EstimationError::NotFound(_) => ErrorCode::SessionNotFound,
            EstimationError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            EstimationError::InvalidInput { .. } => ErrorCode::ValidationFailed,
            EstimationError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<ValidationError> for EstimationError {
    fn from(err: ValidationError) -> Self {
        EstimationError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for EstimationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => {
                EstimationError::InvalidInput {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::SessionNotFound => match err
                .details
                .get("session_id")
                .and_then(|id| id.parse::<SessionId>().ok())
            {
                Some(id) => EstimationError::NotFound(id),
                None => EstimationError::Infrastructure(err.to_string()),
            },
            _ => EstimationError::Infrastructure(err.to_string()),
        }
    }
}
