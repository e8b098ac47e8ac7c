//! CreateSessionHandler - Command handler for opening an estimation session.

use std::sync::Arc;

use crate::domain::estimation::{EstimationError, EstimationSession, Participant, Story};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::EstimationSessionRepository;

/// Command to open a session on a first story.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub host_name: String,
    pub story_title: String,
    pub story_description: String,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateSessionResult {
    pub session: EstimationSession,
    pub host_id: ParticipantId,
}

/// Handler for creating sessions.
pub struct CreateSessionHandler {
    repository: Arc<dyn EstimationSessionRepository>,
}

impl CreateSessionHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateSessionCommand,
    ) -> Result<CreateSessionResult, EstimationError> {
        let host = Participant::host(cmd.host_name)?;
        let story = Story::new(cmd.story_title, cmd.story_description)?;
        let host_id = host.id();

        let session = EstimationSession::new(SessionId::new(), story, host)?;
        self.repository.save(&session).await?;

        tracing::info!(session_id = %session.id(), host_id = %host_id, "estimation session created");

        Ok(CreateSessionResult { session, host_id })
    }
}
