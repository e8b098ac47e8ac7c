//! RevealCardsHandler - Command handler for turning the cards face up.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{EstimationError, EstimationSession, RevealPolicy};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Command to reveal the cards.
#[derive(Debug, Clone)]
pub struct RevealCardsCommand {
    pub session_id: SessionId,
}

/// Handler for revealing cards.
pub struct RevealCardsHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
    policy: RevealPolicy,
}

impl RevealCardsHandler {
    pub fn new(
        repository: Arc<dyn EstimationSessionRepository>,
        locks: Arc<SessionLocks>,
        policy: RevealPolicy,
    ) -> Self {
        Self {
            repository,
            locks,
            policy,
        }
    }

    pub async fn handle(&self, cmd: RevealCardsCommand) -> Result<EstimationSession, EstimationError> {
        let policy = self.policy;
        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.reveal(policy)
        })
        .await?;

        match session.stats() {
            Some(stats) => tracing::info!(
                session_id = %cmd.session_id,
                average = %stats.average_label(),
                voters = stats.voter_count,
                "cards revealed"
            ),
            None => tracing::info!(session_id = %cmd.session_id, "cards revealed without numeric votes"),
        }

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::application::handlers::estimation::test_support::{seeded_session, vote_all};
    use crate::domain::estimation::{Card, EstimationState};

    #[tokio::test]
    async fn reveal_after_everyone_voted() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 3).await;
        vote_all(&repo, &session, &[Card::One, Card::Two, Card::Three]).await;
        let handler = RevealCardsHandler::new(repo, Arc::new(SessionLocks::new()), RevealPolicy::strict());

        let revealed = handler
            .handle(RevealCardsCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert_eq!(revealed.state(), EstimationState::Revealed);
        assert_eq!(revealed.stats().unwrap().average_label(), "2.0");
    }

    #[tokio::test]
    async fn strict_policy_blocks_incomplete_reveal() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 2).await;
        let handler = RevealCardsHandler::new(repo, Arc::new(SessionLocks::new()), RevealPolicy::strict());

        let result = handler
            .handle(RevealCardsCommand {
                session_id: *session.id(),
            })
            .await;

        assert!(matches!(result, Err(EstimationError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn permissive_policy_allows_incomplete_reveal() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 2).await;
        let handler = RevealCardsHandler::new(repo, Arc::new(SessionLocks::new()), RevealPolicy::permissive());

        let revealed = handler
            .handle(RevealCardsCommand {
                session_id: *session.id(),
            })
            .await
            .unwrap();

        assert!(revealed.state().is_revealed());
        assert_eq!(revealed.stats(), None);
    }

    #[tokio::test]
    async fn second_reveal_is_rejected() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, 1).await;
        vote_all(&repo, &session, &[Card::Five]).await;
        let handler = RevealCardsHandler::new(repo, Arc::new(SessionLocks::new()), RevealPolicy::strict());
        let cmd = RevealCardsCommand {
            session_id: *session.id(),
        };

        handler.handle(cmd.clone()).await.unwrap();
        let result = handler.handle(cmd).await;

        assert!(matches!(result, Err(EstimationError::InvalidTransition { .. })));
    }
}
