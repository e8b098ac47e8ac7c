//! JoinSessionHandler - Command handler for seating a participant.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{EstimationError, EstimationSession, Participant};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::EstimationSessionRepository;

/// Command to join a session.
#[derive(Debug, Clone)]
pub struct JoinSessionCommand {
    pub session_id: SessionId,
    pub name: String,
}

/// Result of a successful join.
#[derive(Debug, Clone)]
pub struct JoinSessionResult {
    pub session: EstimationSession,
    pub participant_id: ParticipantId,
}

/// Handler for joining sessions.
pub struct JoinSessionHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl JoinSessionHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: JoinSessionCommand) -> Result<JoinSessionResult, EstimationError> {
        let participant = Participant::new(cmd.name)?;
        let participant_id = participant.id();

        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.join(participant)
        })
        .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            participant_id = %participant_id,
            "participant joined"
        );

        Ok(JoinSessionResult {
            session,
            participant_id,
        })
    }
}
