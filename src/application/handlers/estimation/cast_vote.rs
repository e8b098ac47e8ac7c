//! CastVoteHandler - Command handler for playing a card.

use std::sync::Arc;

use super::session_locks::{update_session, SessionLocks};
use crate::domain::estimation::{Card, EstimationError, EstimationSession};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::EstimationSessionRepository;

/// Command to cast a vote. `card` is the raw token, e.g. `"5"` or `"☕"`.
#[derive(Debug, Clone)]
pub struct CastVoteCommand {
    pub session_id: SessionId,
    pub participant_id: ParticipantId,
    pub card: String,
}

/// Handler for casting votes.
pub struct CastVoteHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
}

impl CastVoteHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self { repository, locks }
    }

    pub async fn handle(&self, cmd: CastVoteCommand) -> Result<EstimationSession, EstimationError> {
        // Off-deck values never reach the session.
        let card: Card = cmd.card.parse()?;

        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.cast_vote(cmd.participant_id, card)
        })
        .await?;

        let progress = session.voting_progress();
        tracing::debug!(
            session_id = %cmd.session_id,
            participant_id = %cmd.participant_id,
            voted = progress.voted,
            total = progress.total,
            "vote cast"
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionRepository;
    use crate::application::handlers::estimation::test_support::seeded_session;
    use crate::domain::estimation::RevealPolicy;

    async fn setup(players: usize) -> (Arc<InMemorySessionRepository>, EstimationSession, CastVoteHandler) {
        let repo = Arc::new(InMemorySessionRepository::new());
        let session = seeded_session(&repo, players).await;
        let handler = CastVoteHandler::new(repo.clone(), Arc::new(SessionLocks::new()));
        (repo, session, handler)
    }

    fn vote(session: &EstimationSession, index: usize, card: &str) -> CastVoteCommand {
        CastVoteCommand {
            session_id: *session.id(),
            participant_id: session.participants()[index].id(),
            card: card.to_string(),
        }
    }

    #[tokio::test]
    async fn vote_is_recorded() {
        let (repo, session, handler) = setup(2).await;

        let updated = handler.handle(vote(&session, 1, "8")).await.unwrap();

        assert_eq!(updated.participants()[1].vote(), Some(Card::Eight));
        assert_eq!(updated.participants()[0].vote(), None);
        let stored = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn special_cards_are_accepted() {
        let (_repo, session, handler) = setup(2).await;

        handler.handle(vote(&session, 0, "?")).await.unwrap();
        let updated = handler.handle(vote(&session, 1, "☕")).await.unwrap();

        assert_eq!(updated.participants()[0].vote(), Some(Card::Unknown));
        assert_eq!(updated.participants()[1].vote(), Some(Card::Break));
    }

    #[tokio::test]
    async fn off_deck_value_is_rejected() {
        let (repo, session, handler) = setup(2).await;

        let result = handler.handle(vote(&session, 0, "4")).await;

        assert!(matches!(result, Err(EstimationError::InvalidInput { ref field, .. }) if field == "vote"));
        let stored = repo.find_by_id(session.id()).await.unwrap().unwrap();
        assert_eq!(stored, session);
    }

    #[tokio::test]
    async fn changing_vote_replaces_previous_card() {
        let (_repo, session, handler) = setup(1).await;

        handler.handle(vote(&session, 0, "3")).await.unwrap();
        let updated = handler.handle(vote(&session, 0, "13")).await.unwrap();

        assert_eq!(updated.participants()[0].vote(), Some(Card::Thirteen));
    }

    #[tokio::test]
    async fn voting_after_reveal_is_rejected() {
        let (repo, session, handler) = setup(1).await;
        handler.handle(vote(&session, 0, "5")).await.unwrap();
        let stored = repo.find_by_id(session.id()).await.unwrap().unwrap();
        repo.update(&stored.reveal(RevealPolicy::strict()).unwrap())
            .await
            .unwrap();

        let result = handler.handle(vote(&session, 0, "8")).await;

        assert!(matches!(result, Err(EstimationError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn unknown_participant_is_rejected() {
        let (_repo, session, handler) = setup(1).await;

        let result = handler
            .handle(CastVoteCommand {
                session_id: *session.id(),
                participant_id: ParticipantId::new(),
                card: "5".to_string(),
            })
            .await;

        assert!(matches!(result, Err(EstimationError::InvalidInput { .. })));
    }
}
