//! Story Analyzer Port - advisory estimate for a story.
//!
//! The analysis is a side channel: callers treat every error as
//! "no analysis available" and keep the session moving.

use async_trait::async_trait;

use super::AIError;
use crate::domain::analysis::StoryAnalysis;
use crate::domain::foundation::{ErrorCode, SessionId, ValidationError};

/// Input for a story analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub title: String,
    pub description: String,
    /// Session the story belongs to, for log correlation.
    pub session_id: Option<SessionId>,
}

impl AnalysisRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            session_id: None,
        }
    }

    pub fn for_session(mut self, session_id: SessionId) -> Self {
        self.session_id = Some(session_id);
        self
    }
}

/// Port for the external story analysis collaborator.
#[async_trait]
pub trait StoryAnalyzer: Send + Sync {
    /// Produces an advisory estimate, reasoning and risks for a story.
    async fn analyze(&self, request: AnalysisRequest) -> Result<StoryAnalysis, AnalysisError>;
}

/// Reasons an analysis could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No analysis service is configured.
    #[error("story analysis is disabled")]
    Disabled,

    /// The provider call failed.
    #[error("analysis provider failed: {0}")]
    Provider(#[from] AIError),

    /// The provider answered, but not in the expected shape.
    #[error("analysis response rejected: {0}")]
    InvalidResponse(#[from] ValidationError),
}

impl AnalysisError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::Disabled => ErrorCode::AnalysisUnavailable,
            AnalysisError::Provider(_) => ErrorCode::AIProviderError,
            AnalysisError::InvalidResponse(_) => ErrorCode::InvalidFormat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn story_analyzer_is_object_safe() {
        fn _accepts_dyn(_analyzer: &dyn StoryAnalyzer) {}
    }

    #[test]
    fn provider_errors_convert() {
        let err: AnalysisError = AIError::AuthenticationFailed.into();
        assert_eq!(err.code(), ErrorCode::AIProviderError);
        assert_eq!(err.to_string(), "analysis provider failed: authentication failed");
    }

    #[test]
    fn request_carries_session_for_correlation() {
        let id = SessionId::new();
        let request = AnalysisRequest::new("Title", "Description").for_session(id);
        assert_eq!(request.session_id, Some(id));
    }
}
