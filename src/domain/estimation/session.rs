//! EstimationSession aggregate.
//!
//! One estimation sitting: the current story, the participants around the
//! table, the lifecycle state of the round, and the stories estimated
//! before this one.
//!
//! # Snapshots
//!
//! Every operation takes `&self` and returns a brand new snapshot. The
//! receiver is never touched, so a failed operation leaves nothing
//! half-applied and callers can keep the previous snapshot around.

use serde::{Deserialize, Serialize};

use super::{Card, EstimationError, EstimationState, Participant, RevealPolicy, Story};
use crate::domain::analysis::{compute_stats, VoteStats};
use crate::domain::foundation::{ParticipantId, SessionId, StateMachine};

/// How many participants have played a card this round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VotingProgress {
    pub voted: usize,
    pub total: usize,
}

impl VotingProgress {
    pub fn is_complete(&self) -> bool {
        self.voted == self.total
    }
}

/// Estimation session aggregate.
///
/// # Invariants
///
/// - exactly one story is current
/// - participant ids are unique
/// - a present vote is always a card from the deck
/// - `history` is append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimationSession {
    id: SessionId,
    current_story: Story,
    participants: Vec<Participant>,
    state: EstimationState,
    history: Vec<Story>,
}

impl EstimationSession {
    /// Opens a session on `story` with `host` seated first.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the story fails validation or `host` is not
    ///   flagged as host
    pub fn new(id: SessionId, story: Story, host: Participant) -> Result<Self, EstimationError> {
        story.validate()?;
        if !host.is_host() {
            return Err(EstimationError::invalid_input(
                "host",
                "the first participant must be the host",
            ));
        }

        Ok(Self {
            id,
            current_story: story,
            participants: vec![host.with_vote(None)],
            state: EstimationState::Voting,
            history: Vec::new(),
        })
    }

    /// Reconstitute a session from storage (no validation).
    pub fn reconstitute(
        id: SessionId,
        current_story: Story,
        participants: Vec<Participant>,
        state: EstimationState,
        history: Vec<Story>,
    ) -> Self {
        Self {
            id,
            current_story,
            participants,
            state,
            history,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn current_story(&self) -> &Story {
        &self.current_story
    }

    /// Participants in display order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn state(&self) -> EstimationState {
        self.state
    }

    /// Previously estimated stories, oldest first.
    pub fn history(&self) -> &[Story] {
        &self.history
    }

    pub fn voting_progress(&self) -> VotingProgress {
        VotingProgress {
            voted: self.participants.iter().filter(|p| p.has_voted()).count(),
            total: self.participants.len(),
        }
    }

    /// True when every participant holds a card.
    pub fn all_voted(&self) -> bool {
        self.participants.iter().all(Participant::has_voted)
    }

    /// Vote statistics, only ever computed once the cards are revealed.
    pub fn stats(&self) -> Option<VoteStats> {
        if self.state.is_revealed() {
            compute_stats(&self.participants)
        } else {
            None
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Plays `card` for one participant.
    ///
    /// Every other participant's vote is left as is. Casting the same card
    /// twice produces the same snapshot.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the cards are already revealed
    /// - `InvalidInput` if no participant has `participant_id`
    pub fn cast_vote(
        &self,
        participant_id: ParticipantId,
        card: Card,
    ) -> Result<Self, EstimationError> {
        if !self.state.accepts_votes() {
            return Err(EstimationError::invalid_transition(
                self.state,
                "cast a vote",
                "start a new round first",
            ));
        }
        let index = self.participant_index(participant_id)?;

        let mut next = self.clone();
        next.participants[index] = self.participants[index].with_vote(Some(card));
        Ok(next)
    }

    /// Turns the cards face up.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if already revealed, or if someone has not
    ///   voted and the policy does not allow an incomplete reveal
    pub fn reveal(&self, policy: RevealPolicy) -> Result<Self, EstimationError> {
        let state = self
            .state
            .transition_to(EstimationState::Revealed)
            .map_err(|_| {
                EstimationError::invalid_transition(
                    self.state,
                    "reveal",
                    "cards are already face up",
                )
            })?;

        if !policy.allow_incomplete_reveal && !self.all_voted() {
            let progress = self.voting_progress();
            return Err(EstimationError::invalid_transition(
                self.state,
                "reveal",
                format!(
                    "only {} of {} participants have voted",
                    progress.voted, progress.total
                ),
            ));
        }

        Ok(Self {
            state,
            ..self.clone()
        })
    }

    /// Starts a fresh round on the same story: back to `Voting`, every
    /// vote cleared. Legal from any state and idempotent.
    pub fn reset(&self) -> Self {
        Self {
            state: EstimationState::Voting,
            participants: self.cleared_participants(),
            ..self.clone()
        }
    }

    /// Makes `story` current and files the previous story into history.
    ///
    /// Votes and state are reset exactly as `reset` does.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if title or description is blank
    pub fn load_story(&self, story: Story) -> Result<Self, EstimationError> {
        story.validate()?;

        let mut history = self.history.clone();
        history.push(self.current_story.clone());

        Ok(Self {
            id: self.id,
            current_story: story,
            participants: self.cleared_participants(),
            state: EstimationState::Voting,
            history,
        })
    }

    /// Records the agreed estimate on the current story.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the cards are revealed
    pub fn record_final_estimate(&self, estimate: Card) -> Result<Self, EstimationError> {
        if !self.state.is_revealed() {
            return Err(EstimationError::invalid_transition(
                self.state,
                "record a final estimate",
                "reveal the cards first",
            ));
        }

        Ok(Self {
            current_story: self.current_story.with_final_estimate(estimate),
            ..self.clone()
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    /// Seats a new participant at the end of the table, without a vote.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the id is already seated or the participant
    ///   claims to be a second host
    pub fn join(&self, participant: Participant) -> Result<Self, EstimationError> {
        if self.participant(participant.id()).is_some() {
            return Err(EstimationError::invalid_input(
                "participant_id",
                format!("participant {} already joined", participant.id()),
            ));
        }
        if participant.is_host() {
            return Err(EstimationError::invalid_input(
                "participant",
                "the session already has a host",
            ));
        }

        let mut next = self.clone();
        next.participants.push(participant.with_vote(None));
        Ok(next)
    }

    /// Removes a participant from the table.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if the participant is unknown or is the host
    pub fn leave(&self, participant_id: ParticipantId) -> Result<Self, EstimationError> {
        let index = self.participant_index(participant_id)?;
        if self.participants[index].is_host() {
            return Err(EstimationError::invalid_input(
                "participant_id",
                "the host cannot leave the session",
            ));
        }

        let mut next = self.clone();
        next.participants.remove(index);
        Ok(next)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn participant_index(&self, participant_id: ParticipantId) -> Result<usize, EstimationError> {
        self.participants
            .iter()
            .position(|p| p.id() == participant_id)
            .ok_or_else(|| {
                EstimationError::invalid_input(
                    "participant_id",
                    format!("no participant {} in this session", participant_id),
                )
            })
    }

    fn cleared_participants(&self) -> Vec<Participant> {
        self.participants.iter().map(|p| p.with_vote(None)).collect()
    }
}
