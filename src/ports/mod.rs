//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `EstimationSessionRepository` - session snapshot persistence
//! - `StoryAnalyzer` - advisory story estimates
//! - `AIProvider` - raw LLM completions used by the analyzer

mod ai_provider;
mod session_repository;
mod story_analyzer;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub(crate) use ai_provider::map_transport_error;
pub use session_repository::EstimationSessionRepository;
pub use story_analyzer::{AnalysisError, AnalysisRequest, StoryAnalyzer};
