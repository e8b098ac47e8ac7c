//! Story analysis adapters.
//!
//! - `LlmStoryAnalyzer` - prompts an `AIProvider` and validates the reply
//! - `DisabledStoryAnalyzer` - stand-in when no provider is configured

mod disabled_story_analyzer;
mod llm_story_analyzer;

pub use disabled_story_analyzer::DisabledStoryAnalyzer;
pub use llm_story_analyzer::LlmStoryAnalyzer;
