//! GetSessionHandler - Query handler for the current session snapshot.

use std::sync::Arc;

use crate::domain::estimation::{EstimationError, EstimationSession};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Query for a session.
#[derive(Debug, Clone)]
pub struct GetSessionQuery {
    pub session_id: SessionId,
}

/// Handler for reading sessions. Reads take no lock.
pub struct GetSessionHandler {
    repository: Arc<dyn EstimationSessionRepository>,
}

impl GetSessionHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetSessionQuery) -> Result<EstimationSession, EstimationError> {
        self.repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| EstimationError::not_found(query.session_id))
    }
}
