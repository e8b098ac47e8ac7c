//! LLM-backed StoryAnalyzer implementation.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::analysis::StoryAnalysis;
use crate::ports::{
    AIProvider, AnalysisError, AnalysisRequest, CompletionRequest, MessageRole, RequestMetadata,
    StoryAnalyzer,
};

const SYSTEM_PROMPT: &str = "You are an experienced agile coach helping a team size user stories. \
Answer with a single JSON object and nothing else.";

/// Story analyzer that asks an LLM for a Fibonacci estimate.
pub struct LlmStoryAnalyzer {
    ai_provider: Arc<dyn AIProvider>,
    max_tokens: u32,
}

impl LlmStoryAnalyzer {
    pub fn new(ai_provider: Arc<dyn AIProvider>) -> Self {
        Self {
            ai_provider,
            max_tokens: 1024,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Create the estimation prompt for a story
    fn create_prompt(title: &str, description: &str) -> String {
        format!(
            r#"Analyze the following agile user story and provide a story point estimation based on the Fibonacci sequence (0, 0.5, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89).
Consider complexity, uncertainty, and effort.

Story Title: {}
Story Description: {}

Respond with JSON of exactly this shape:
{{
  "suggestedPoints": "one value from the sequence, as a string",
  "reasoning": "brief explanation of the estimate",
  "risks": ["potential risk or unknown", "..."],
  "complexityScore": 1-10
}}"#,
            title.trim(),
            description.trim()
        )
    }
}

/// Pulls the JSON document out of a model reply.
///
/// Models sometimes wrap the answer in a Markdown code fence even when asked
/// not to; the fence and its language tag are stripped.
fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the info string ("json", "JSON", ...) up to the first newline.
    let body = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };

    body.trim_end().strip_suffix("```").unwrap_or(body).trim()
}

#[async_trait]
impl StoryAnalyzer for LlmStoryAnalyzer {
    async fn analyze(&self, request: AnalysisRequest) -> Result<StoryAnalysis, AnalysisError> {
        let trace_id = format!("story-analysis-{}", uuid::Uuid::new_v4());
        let completion_request =
            CompletionRequest::new(RequestMetadata::new(request.session_id, trace_id.clone()))
                .with_system_prompt(SYSTEM_PROMPT)
                .with_message(
                    MessageRole::User,
                    Self::create_prompt(&request.title, &request.description),
                )
                .with_max_tokens(self.max_tokens)
                .with_temperature(0.2)
                .with_json_response();

        let provider = self.ai_provider.provider_info();
        tracing::debug!(
            trace_id = %trace_id,
            provider = %provider.name,
            model = %provider.model,
            "requesting story analysis"
        );

        let response = self.ai_provider.complete(completion_request).await?;

        let analysis = StoryAnalysis::from_json(extract_json(&response.content)).map_err(|e| {
            tracing::warn!(
                trace_id = %trace_id,
                finish_reason = ?response.finish_reason,
                error = %e,
                "story analysis response rejected"
            );
            AnalysisError::from(e)
        })?;

        tracing::debug!(
            trace_id = %trace_id,
            suggested_points = %analysis.suggested_points(),
            total_tokens = response.usage.total_tokens,
            "story analysis complete"
        );

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::estimation::Card;
    use crate::domain::foundation::SessionId;
    use crate::ports::AIError;

    const VALID: &str = r#"{"suggestedPoints":"5","reasoning":"Standard CRUD with auth checks.","risks":["Legacy schema"],"complexityScore":4}"#;

    fn analyzer(provider: MockAIProvider) -> LlmStoryAnalyzer {
        LlmStoryAnalyzer::new(Arc::new(provider))
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest::new("User Authentication", "Implement JWT login flow")
    }

    #[tokio::test]
    async fn returns_validated_analysis() {
        let analysis = analyzer(MockAIProvider::new().with_response(VALID))
            .analyze(request())
            .await
            .unwrap();

        assert_eq!(analysis.suggested_card(), Some(Card::Five));
        assert_eq!(analysis.risks(), &["Legacy schema"]);
        assert_eq!(analysis.complexity_level(), 4);
    }

    #[tokio::test]
    async fn prompt_contains_story_and_asks_for_json() {
        let provider = MockAIProvider::new().with_response(VALID);
        let session_id = SessionId::new();
        analyzer(provider.clone())
            .analyze(request().for_session(session_id))
            .await
            .unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        let prompt = &calls[0].messages[0].content;
        assert!(prompt.contains("Story Title: User Authentication"));
        assert!(prompt.contains("Story Description: Implement JWT login flow"));
        assert!(prompt.contains("Fibonacci"));
        assert!(calls[0].json_response);
        assert_eq!(calls[0].metadata.session_id, Some(session_id));
    }

    #[tokio::test]
    async fn fenced_reply_is_accepted() {
        let fenced = format!("```json\n{}\n```", VALID);
        let result = analyzer(MockAIProvider::new().with_response(fenced))
            .analyze(request())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn prose_reply_is_rejected() {
        let result = analyzer(MockAIProvider::new().with_response("Probably a 5."))
            .analyze(request())
            .await;

        assert!(matches!(result, Err(AnalysisError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn incomplete_document_is_rejected() {
        let result = analyzer(
            MockAIProvider::new().with_response(r#"{"suggestedPoints":"5","reasoning":"x"}"#),
        )
        .analyze(request())
        .await;

        assert!(matches!(result, Err(AnalysisError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let result = analyzer(MockAIProvider::new().with_error(MockError::AuthenticationFailed))
            .analyze(request())
            .await;

        assert!(matches!(
            result,
            Err(AnalysisError::Provider(AIError::AuthenticationFailed))
        ));
    }

    #[test]
    fn extract_json_handles_fences() {
        assert_eq!(extract_json("  {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(extract_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(extract_json("```\n{\"a\":1}\n```\n"), "{\"a\":1}");
        assert_eq!(extract_json("```JSON\n{\"a\":1}"), "{\"a\":1}");
    }
}
