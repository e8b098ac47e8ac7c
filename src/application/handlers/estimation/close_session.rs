//! CloseSessionHandler - Command handler for ending a session.
//!
//! Removes the stored snapshot and the session's lock entry. Commands that
//! were already queued on the lock see `NotFound` once it is released.

use std::sync::Arc;

use super::session_locks::SessionLocks;
use crate::domain::estimation::EstimationError;
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Command to close a session for good.
#[derive(Debug, Clone)]
pub struct CloseSessionCommand {
    pub session_id: SessionId,
}

/// Handler for closing sessions.
pub struct CloseSessionHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl CloseSessionHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    /// # Errors
    ///
    /// - `NotFound` if the session does not exist (or is already closed)
    pub async fn handle(&self, cmd: CloseSessionCommand) -> Result<(), EstimationError> {
        {
            let _guard = self.locks.acquire(cmd.session_id).await;

            if !self.repository.exists(&cmd.session_id).await? {
                return Err(EstimationError::not_found(cmd.session_id));
            }
            self.repository.delete(&cmd.session_id).await?;
        }
        self.locks.forget(&cmd.session_id).await;

        tracing::info!(session_id = %cmd.session_id, "session closed");

        Ok(())
    }
}
