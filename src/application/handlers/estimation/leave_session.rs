//! LeaveSessionHandler - Command handler for removing a participant.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{EstimationError, EstimationSession};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::EstimationSessionRepository;

/// Command to leave a session.
#[derive(Debug, Clone)]
pub struct LeaveSessionCommand {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
}

/// Handler for leaving sessions.
pub struct LeaveSessionHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl LeaveSessionHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: LeaveSessionCommand) -> Result<EstimationSession, EstimationError> {
        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.leave(cmd.participant_id)
        })
        .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            participant_id = %cmd.participant_id,
            "participant left"
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::application::handlers::estimation::test_support::seeded_session;

    #[tokio::test]
    async fn guest_can_leave() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 3).await;
        let guest = session.participants()[2].id();
        let handler = LeaveSessionHandler::new(repo, Arc::new(SessionLocks::new()));

        let updated = handler
            .handle(LeaveSessionCommand {
                session_id: *session.id(),
                participant_id: guest,
            })
            .await
            .unwrap();

        assert_eq!(updated.participants().len(), 2);
        assert!(updated.participant(guest).is_none());
    }

    #[tokio::test]
    async fn host_cannot_leave() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 2).await;
        let host = session.participants()[0].id();
        let handler = LeaveSessionHandler::new(repo, Arc::new(SessionLocks::new()));

        let result = handler
            .handle(LeaveSessionCommand {
                session_id: *session.id(),
                participant_id: host,
            })
            .await;

        assert!(matches!(result, Err(EstimationError::InvalidInput { .. })));
    }
}
