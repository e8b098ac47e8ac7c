//! AnalyzeStoryHandler - Query handler for an advisory estimate.
//!
//! Analysis never blocks the round. Every failure of the analysis service
//! is logged and surfaced as "no analysis", and so is a call that outlives
//! the handler's deadline.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::analysis::StoryAnalysis;
use crate::domain::estimation::{EstimationError, Story};
use crate::domain::foundation::SessionId;
use crate::ports::{AnalysisError, AnalysisRequest, EstimationSessionRepository, StoryAnalyzer};

/// Query for an analysis of a session's current story.
#[derive(Debug, Clone)]
pub struct AnalyzeStoryQuery {
    pub session_id: SessionId,
}

/// Upper bound on one analysis unless configured otherwise.
pub const DEFAULT_ANALYSIS_DEADLINE: Duration = Duration::from_secs(20);

/// Handler for story analysis.
pub struct AnalyzeStoryHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    analyzer: Arc<dyn StoryAnalyzer>,
    deadline: Duration,
}

impl AnalyzeStoryHandler {
    pub fn new(
        repository: Arc<dyn EstimationSessionRepository>,
        analyzer: Arc<dyn StoryAnalyzer>,
    ) -> Self {
        Self {
            repository,
            analyzer,
            deadline: DEFAULT_ANALYSIS_DEADLINE,
        }
    }

    /// Caps how long a single analysis may take, retries included.
    /// Keep it below the HTTP request timeout.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    /// Analyzes the current story of a session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session does not exist. Analysis failures are
    ///   not errors; they yield `Ok(None)`.
    pub async fn handle(
        &self,
        query: AnalyzeStoryQuery,
    ) -> Result<Option<StoryAnalysis>, EstimationError> {
        let session = self
            .repository
            .find_by_id(&query.session_id)
            .await?
            .ok_or_else(|| EstimationError::not_found(query.session_id))?;

        Ok(self
            .analyze(query.session_id, session.current_story())
            .await)
    }

    /// Runs the analyzer for one story, swallowing failures.
    pub async fn analyze(&self, session_id: SessionId, story: &Story) -> Option<StoryAnalysis> {
        let request =
            AnalysisRequest::new(story.title(), story.description()).for_session(session_id);

        let outcome = match tokio::time::timeout(self.deadline, self.analyzer.analyze(request)).await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    deadline_ms = self.deadline.as_millis() as u64,
                    "story analysis timed out"
                );
                return None;
            }
        };

        match outcome {
            Ok(analysis) => {
                tracing::info!(
                    session_id = %session_id,
                    suggested_points = %analysis.suggested_points(),
                    "story analyzed"
                );
                Some(analysis)
            }
            Err(AnalysisError::Disabled) => {
                tracing::debug!(session_id = %session_id, "story analysis disabled");
                None
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    code = %e.code(),
                    error = %e,
                    "story analysis unavailable"
                );
                None
            }
        }
    }
}
