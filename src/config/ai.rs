//! AI provider configuration
//!
//! Analysis is optional. When the selected provider has no API key the
//! server still starts; stories are simply not analyzed.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// AI provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Provider used for story analysis
    #[serde(default)]
    pub provider: AiProvider,

    /// Anthropic API key
    pub anthropic_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model override; each provider has its own default
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Extra attempts on transient failures
    #[serde(default)]
    pub max_retries: u32,

    /// Output token cap per analysis
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

/// AI provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Anthropic,
    Gemini,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key of the selected provider, if set and non-empty
    pub fn api_key(&self) -> Option<&str> {
        let key = match self.provider {
            AiProvider::Anthropic => self.anthropic_api_key.as_deref(),
            AiProvider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.map(str::trim).filter(|k| !k.is_empty())
    }

    /// Worst-case wall time of one analysis: every attempt hits the timeout.
    pub fn worst_case_secs(&self) -> u64 {
        self.timeout_secs * (u64::from(self.max_retries) + 1)
    }

    /// Check if story analysis can run
    pub fn is_enabled(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if self.max_retries > 5 {
            return Err(ValidationError::TooManyRetries);
        }
        if self.max_tokens == 0 || self.max_tokens > 8192 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::default(),
            anthropic_api_key: None,
            gemini_api_key: None,
            model: None,
            timeout_secs: default_timeout(),
            max_retries: 0,
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_timeout() -> u64 {
    15
}

fn default_max_tokens() -> u32 {
    1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Anthropic);
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.max_retries, 0);
        assert!(!config.is_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 15,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(15));
    }

    #[test]
    fn test_key_follows_selected_provider() {
        let config = AiConfig {
            provider: AiProvider::Gemini,
            anthropic_api_key: Some("sk-ant-xxx".to_string()),
            gemini_api_key: None,
            ..Default::default()
        };
        assert!(!config.is_enabled());

        let config = AiConfig {
            gemini_api_key: Some("AIza-xxx".to_string()),
            ..config
        };
        assert_eq!(config.api_key(), Some("AIza-xxx"));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let config = AiConfig {
            anthropic_api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_worst_case_counts_every_attempt() {
        let config = AiConfig {
            timeout_secs: 10,
            max_retries: 2,
            ..Default::default()
        };
        assert_eq!(config.worst_case_secs(), 30);
    }

    #[test]
    fn test_validation_bounds() {
        let config = AiConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidAiTimeout));

        let config = AiConfig {
            max_retries: 9,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::TooManyRetries));

        let config = AiConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxTokens));
    }
}
