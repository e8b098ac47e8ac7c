//! EstimationState enum for the lifecycle of a voting round.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle state of an estimation round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EstimationState {
    /// Votes are being cast and stay concealed.
    #[default]
    Voting,
    /// Votes are exposed and statistics may be shown.
    Revealed,
}

impl EstimationState {
    /// Returns true if participants may cast votes.
    pub fn accepts_votes(&self) -> bool {
        matches!(self, EstimationState::Voting)
    }

    /// Returns true once the cards are face up.
    pub fn is_revealed(&self) -> bool {
        matches!(self, EstimationState::Revealed)
    }
}

impl StateMachine for EstimationState {
    /// Valid transitions:
    /// - Voting -> Revealed (reveal)
    /// - Voting -> Voting (reset)
    /// - Revealed -> Voting (reset)
    fn can_transition_to(&self, target: &Self) -> bool {
        use EstimationState::*;
        matches!(
            (self, target),
            (Voting, Revealed) | (Voting, Voting) | (Revealed, Voting)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use EstimationState::*;
        match self {
            Voting => vec![Revealed, Voting],
            Revealed => vec![Voting],
        }
    }
}

impl fmt::Display for EstimationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EstimationState::Voting => "Voting",
            EstimationState::Revealed => "Revealed",
        };
        write!(f, "{}", s)
    }
}
