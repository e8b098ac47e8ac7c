//! RecordFinalEstimateHandler - Command handler for the agreed estimate.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{Card, EstimationError, EstimationSession};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Command to record the team's final estimate on the current story.
#[derive(Debug, Clone)]
pub struct RecordFinalEstimateCommand {
    pub session_id: SessionId,
    pub estimate: String,
}

/// Handler for recording final estimates.
pub struct RecordFinalEstimateHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl RecordFinalEstimateHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(
        &self,
        cmd: RecordFinalEstimateCommand,
    ) -> Result<EstimationSession, EstimationError> {
        let estimate: Card = cmd.estimate.parse()?;

        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.record_final_estimate(estimate)
        })
        .await?;

        tracing::info!(session_id = %cmd.session_id, estimate = %estimate, "final estimate recorded");

        Ok(session)
    }
}
