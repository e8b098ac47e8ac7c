//! HTTP DTOs for estimation endpoints.
//!
//! These types decouple the HTTP API from domain types. Votes are only
//! rendered once the round is revealed; until then a participant shows
//! `has_voted` and nothing else.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{StoryAnalysis, VoteStats};
use crate::domain::estimation::{
    EstimationSession, EstimationState, Participant, Story, VotingProgress,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to open a session.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub host_name: String,
    pub title: String,
    pub description: String,
}

/// Request to join a session.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinSessionRequest {
    pub name: String,
}

/// Request to cast a vote.
#[derive(Debug, Clone, Deserialize)]
pub struct CastVoteRequest {
    #[serde(alias = "vote")]
    pub card: String,
}

/// Request to load the next story.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadStoryRequest {
    pub title: String,
    pub description: String,
}

/// Request to record the agreed estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct FinalEstimateRequest {
    pub estimate: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Session snapshot as seen by clients.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub id: String,
    pub state: EstimationState,
    pub story: StoryResponse,
    pub participants: Vec<ParticipantResponse>,
    pub progress: VotingProgress,
    /// Present only after reveal, and only when a numeric card was played.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsResponse>,
    pub history: Vec<StoryResponse>,
}

impl From<&EstimationSession> for SessionResponse {
    fn from(session: &EstimationSession) -> Self {
        let revealed = session.state().is_revealed();
        Self {
            id: session.id().to_string(),
            state: session.state(),
            story: session.current_story().into(),
            participants: session
                .participants()
                .iter()
                .map(|p| ParticipantResponse::new(p, revealed))
                .collect(),
            progress: session.voting_progress(),
            stats: session.stats().map(Into::into),
            history: session.history().iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantResponse {
    pub id: String,
    pub name: String,
    pub is_host: bool,
    pub has_voted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<String>,
}

impl ParticipantResponse {
    fn new(participant: &Participant, revealed: bool) -> Self {
        Self {
            id: participant.id().to_string(),
            name: participant.name().to_string(),
            is_host: participant.is_host(),
            has_voted: participant.has_voted(),
            vote: if revealed {
                participant.vote().map(|c| c.to_string())
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StoryResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_estimate: Option<String>,
}

impl From<&Story> for StoryResponse {
    fn from(story: &Story) -> Self {
        Self {
            id: story.id().to_string(),
            title: story.title().to_string(),
            description: story.description().to_string(),
            final_estimate: story.final_estimate().map(|c| c.to_string()),
        }
    }
}

/// Vote statistics. `average` is a one-decimal string such as `"2.0"`.
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub average: String,
    pub min: f64,
    pub max: f64,
    pub voter_count: usize,
}

impl From<VoteStats> for StatsResponse {
    fn from(stats: VoteStats) -> Self {
        Self {
            average: stats.average_label(),
            min: stats.min,
            max: stats.max,
            voter_count: stats.voter_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub suggested_points: String,
    /// False when the suggestion is not a card from the deck.
    pub suggestion_in_deck: bool,
    pub reasoning: String,
    pub risks: Vec<String>,
    pub complexity_score: f64,
    pub complexity_level: u8,
    pub analyzed_at: String,
}

impl From<&StoryAnalysis> for AnalysisResponse {
    fn from(analysis: &StoryAnalysis) -> Self {
        Self {
            suggested_points: analysis.suggested_points().to_string(),
            suggestion_in_deck: analysis.suggested_card().is_some(),
            reasoning: analysis.reasoning().to_string(),
            risks: analysis.risks().to_vec(),
            complexity_score: analysis.complexity_score(),
            complexity_level: analysis.complexity_level(),
            analyzed_at: analysis.analyzed_at().to_rfc3339(),
        }
    }
}

/// Response for session creation.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionResponse {
    pub host_id: String,
    pub session: SessionResponse,
}

/// Response for joining a session.
#[derive(Debug, Clone, Serialize)]
pub struct JoinSessionResponse {
    pub participant_id: String,
    pub session: SessionResponse,
}

/// Response for loading a story.
#[derive(Debug, Clone, Serialize)]
pub struct LoadStoryResponse {
    pub session: SessionResponse,
    pub analysis: Option<AnalysisResponse>,
}

/// Response for an analysis request; `null` when unavailable.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisEnvelope {
    pub analysis: Option<AnalysisResponse>,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            code: "CONFLICT".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimation::{Card, RevealPolicy};
    use crate::domain::foundation::SessionId;

    fn session_with_votes() -> EstimationSession {
        let story = Story::new("User Authentication", "Implement JWT login flow").unwrap();
        let host = Participant::host("Alice").unwrap();
        let session = EstimationSession::new(SessionId::new(), story, host).unwrap();
        let session = session.join(Participant::new("Bob").unwrap()).unwrap();
        let ids: Vec<_> = session.participants().iter().map(|p| p.id()).collect();
        session
            .cast_vote(ids[0], Card::Three)
            .unwrap()
            .cast_vote(ids[1], Card::Five)
            .unwrap()
    }

    #[test]
    fn votes_are_hidden_while_voting() {
        let session = session_with_votes();
        let json = serde_json::to_value(SessionResponse::from(&session)).unwrap();

        assert_eq!(json["state"], "voting");
        assert_eq!(json["participants"][0]["has_voted"], true);
        assert!(json["participants"][0].get("vote").is_none());
        assert!(json.get("stats").is_none());
        assert_eq!(json["progress"]["voted"], 2);
    }

    #[test]
    fn votes_and_stats_are_shown_after_reveal() {
        let session = session_with_votes().reveal(RevealPolicy::strict()).unwrap();
        let json = serde_json::to_value(SessionResponse::from(&session)).unwrap();

        assert_eq!(json["state"], "revealed");
        assert_eq!(json["participants"][0]["vote"], "3");
        assert_eq!(json["participants"][1]["vote"], "5");
        assert_eq!(json["stats"]["average"], "4.0");
        assert_eq!(json["stats"]["min"], 3.0);
        assert_eq!(json["stats"]["max"], 5.0);
    }

    #[test]
    fn cast_vote_request_accepts_vote_alias() {
        let req: CastVoteRequest = serde_json::from_str(r#"{"vote": "☕"}"#).unwrap();
        assert_eq!(req.card, "☕");
    }

    #[test]
    fn analysis_response_flags_off_deck_suggestion() {
        let analysis = StoryAnalysis::new("4", "Between 3 and 5", vec![], 4.0).unwrap();
        let response = AnalysisResponse::from(&analysis);
        assert!(!response.suggestion_in_deck);
        assert_eq!(response.complexity_level, 4);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::conflict("nope")).unwrap();
        assert_eq!(json["code"], "CONFLICT");
        assert!(json.get("details").is_none());
    }
}
