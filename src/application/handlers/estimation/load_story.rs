//! LoadStoryHandler - Command handler for moving the table to a new story.
//!
//! The previous story goes to history and the round restarts. When
//! configured, an advisory analysis of the new story is requested after
//! the new snapshot is stored; the session lock is not held meanwhile.

use std::sync::Arc;

use super::analyze_story::AnalyzeStoryHandler;
use super::session_locks::{update_session, SessionLocks};
use crate::domain::analysis::StoryAnalysis;
use crate::domain::estimation::{EstimationError, EstimationSession, Story};
use crate::domain::foundation::SessionId;
use crate::ports::EstimationSessionRepository;

/// Command to load a new story.
#[derive(Debug, Clone)]
pub struct LoadStoryCommand {
    pub session_id: SessionId,
    pub title: String,
    pub description: String,
}

/// Result of loading a story.
#[derive(Debug, Clone)]
pub struct LoadStoryResult {
    pub session: EstimationSession,
    /// `None` when analysis is off or the service failed.
    pub analysis: Option<StoryAnalysis>,
}

/// Handler for loading stories.
pub struct LoadStoryHandler {
    repository: Arc<dyn EstimationSessionRepository>,
    locks: Arc<SessionLocks>,
    analysis: Option<Arc<AnalyzeStoryHandler>>,
}

impl LoadStoryHandler {
    pub fn new(repository: Arc<dyn EstimationSessionRepository>, locks: Arc<SessionLocks>) -> Self {
        Self {
            repository,
            locks,
            analysis: None,
        }
    }

    /// Requests an analysis for every loaded story.
    pub fn with_analysis(mut self, analysis: Arc<AnalyzeStoryHandler>) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub async fn handle(&self, cmd: LoadStoryCommand) -> Result<LoadStoryResult, EstimationError> {
        let story = Story::new(cmd.title, cmd.description)?;

        let session = update_session(self.repository.as_ref(), &self.locks, cmd.session_id, |s| {
            s.load_story(story)
        })
        .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            story_id = %session.current_story().id(),
            history_len = session.history().len(),
            "story loaded"
        );

        let analysis = match &self.analysis {
            Some(handler) => {
                handler
                    .analyze(cmd.session_id, session.current_story())
                    .await
            }
            None => None,
        };

        Ok(LoadStoryResult { session, analysis })
    }
}
