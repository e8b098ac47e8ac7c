//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers (Anthropic, Gemini, mock)
//! - `analysis` - story analyzers built on an AI provider
//! - `http` - REST endpoints
//! - `storage` - session repositories

pub mod ai;
pub mod analysis;
pub mod http;
pub mod storage;
