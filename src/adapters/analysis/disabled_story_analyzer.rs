//! StoryAnalyzer used when no AI provider is configured.

use async_trait::async_trait;

use crate::domain::analysis::StoryAnalysis;
use crate::ports::{AnalysisError, AnalysisRequest, StoryAnalyzer};

/// Always reports analysis as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStoryAnalyzer;

#[async_trait]
impl StoryAnalyzer for DisabledStoryAnalyzer {
    async fn analyze(&self, _request: AnalysisRequest) -> Result<StoryAnalysis, AnalysisError> {
        Err(AnalysisError::Disabled)
    }
}
