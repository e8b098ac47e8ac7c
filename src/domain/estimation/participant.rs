//! Participant entity - one voting member of a session.

use serde::{Deserialize, Serialize};

use super::Card;
use crate::domain::foundation::{ParticipantId, ValidationError};

/// Maximum length for a participant's display name.
pub const MAX_NAME_LENGTH: usize = 100;

/// A voting member of an estimation session.
///
/// The vote is `None` until the participant plays a card. The host flag
/// is informational only; it grants no extra operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    vote: Option<Card>,
    is_host: bool,
}

impl Participant {
    /// Creates a regular participant with no vote.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `InvalidFormat` if the name is too long
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::build(ParticipantId::new(), name.into(), false)
    }

    /// Creates the host participant.
    pub fn host(name: impl Into<String>) -> Result<Self, ValidationError> {
        Self::build(ParticipantId::new(), name.into(), true)
    }

    /// Reconstitute a participant from storage (no validation).
    pub fn reconstitute(
        id: ParticipantId,
        name: String,
        vote: Option<Card>,
        is_host: bool,
    ) -> Self {
        Self {
            id,
            name,
            vote,
            is_host,
        }
    }

    fn build(id: ParticipantId, name: String, is_host: bool) -> Result<Self, ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "name",
                format!("must be {} characters or less", MAX_NAME_LENGTH),
            ));
        }
        Ok(Self {
            id,
            name: trimmed.to_string(),
            vote: None,
            is_host,
        })
    }

    pub fn id(&self) -> ParticipantId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vote(&self) -> Option<Card> {
        self.vote
    }

    pub fn is_host(&self) -> bool {
        self.is_host
    }

    pub fn has_voted(&self) -> bool {
        self.vote.is_some()
    }

    /// Returns a copy of this participant holding `vote`.
    pub(crate) fn with_vote(&self, vote: Option<Card>) -> Self {
        Self {
            vote,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_participant_has_not_voted() {
        let p = Participant::new("Sarah").unwrap();
        assert!(!p.has_voted());
        assert!(!p.is_host());
    }

    #[test]
    fn host_constructor_sets_flag() {
        assert!(Participant::host("Dev").unwrap().is_host());
    }

    #[test]
    fn name_is_trimmed() {
        assert_eq!(Participant::new("  Elena ").unwrap().name(), "Elena");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert_eq!(
            Participant::new("   "),
            Err(ValidationError::empty_field("name"))
        );
    }

    #[test]
    fn overlong_name_is_rejected() {
        assert!(Participant::new("x".repeat(MAX_NAME_LENGTH + 1)).is_err());
    }

    #[test]
    fn with_vote_leaves_identity_untouched() {
        let p = Participant::new("James").unwrap();
        let voted = p.with_vote(Some(Card::Five));
        assert_eq!(voted.id(), p.id());
        assert_eq!(voted.name(), p.name());
        assert_eq!(voted.vote(), Some(Card::Five));
        assert_eq!(p.vote(), None);
    }
}
