//! ResetRoundHandler - Command handler for starting a fresh round.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{EstimationError, EstimationSession};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Command to clear every vote and go back to voting.
#[derive(Debug, Clone)]
pub struct ResetRoundCommand {
    pub session_id: SessionId,
}

/// Handler for resetting rounds.
pub struct ResetRoundHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl ResetRoundHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: ResetRoundCommand) -> Result<EstimationSession, EstimationError> {
        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            Ok(s.reset())
        })
        .await?;

        tracing::info!(session_id = %cmd.session_id, "round reset");

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::application::handlers::estimation::test_support::{seeded_session, vote_all};
    use crate::domain::estimation::{Card, EstimationState, RevealPolicy};

    #[tokio::test]
    async fn reset_clears_votes_and_returns_to_voting() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 2).await;
        let voted = vote_all(&repo, &session, &[Card::Three, Card::Eight]).await;
        repo.update(&voted.reveal(RevealPolicy::strict()).unwrap())
            .await
            .unwrap();
        let handler = ResetRoundHandler::new(repo.clone(), Arc::new(SessionLocks::new()));

        let reset = handler
            .handle(ResetRoundCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(reset.state(), EstimationState::Voting);
        assert!(reset.participants().iter().all(|p| p.vote().is_none()));
        assert_eq!(reset.current_story(), session.current_story());
        assert_eq!(repo.find_by_id(session.id()).await.unwrap().unwrap(), reset);
    }

    #[tokio::test]
    async fn reset_is_idempotent() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 2).await;
        let handler = ResetRoundHandler::new(repo, Arc::new(SessionLocks::new()));
        let cmd = ResetRoundCommand {
            session_id: *session.id(),
        };

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        assert_eq!(first, second);
    }
}
