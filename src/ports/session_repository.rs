//! Estimation session repository port.
//!
//! Defines the contract for persisting and retrieving estimation sessions.
//! Sessions are stored and returned as whole snapshots; the application
//! layer serializes writes per session before calling `update`.

use crate::domain::estimation::EstimationSession;
use crate::domain::foundation::{DomainError, SessionId};
use async_trait::async_trait;

/// Repository port for estimation session persistence.
#[async_trait]
pub trait EstimationSessionRepository: Send + Sync {
    /// Save a new session.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a session with the same ID already exists
    /// - `StorageError` on persistence failure
    async fn save(&self, session: &EstimationSession) -> Result<(), DomainError>;

    /// Replace the stored snapshot of an existing session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    /// - `StorageError` on persistence failure
    async fn update(&self, session: &EstimationSession) -> Result<(), DomainError>;

    /// Find a session by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<EstimationSession>, DomainError>;

    /// Check if a session exists.
    async fn exists(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// Delete a session.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if session doesn't exist
    async fn delete(&self, id: &SessionId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn estimation_session_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn EstimationSessionRepository) {}
    }
}
