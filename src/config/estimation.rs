//! Estimation round configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::estimation::RevealPolicy;

/// Estimation behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EstimationConfig {
    /// Allow revealing before every participant has voted
    #[serde(default)]
    pub allow_incomplete_reveal: bool,

    /// Request an advisory analysis whenever a story is loaded
    #[serde(default = "default_analyze_on_load")]
    pub analyze_on_load: bool,

    /// Upper bound on one story analysis in seconds, retries included
    #[serde(default = "default_analysis_timeout")]
    pub analysis_timeout_secs: u64,
}

impl EstimationConfig {
    pub fn reveal_policy(&self) -> RevealPolicy {
        RevealPolicy {
            allow_incomplete_reveal: self.allow_incomplete_reveal,
        }
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis_timeout_secs)
    }

    /// Validate estimation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.analysis_timeout_secs == 0 {
            return Err(ValidationError::InvalidAnalysisTimeout);
        }
        Ok(())
    }
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            allow_incomplete_reveal: false,
            analyze_on_load: default_analyze_on_load(),
            analysis_timeout_secs: default_analysis_timeout(),
        }
    }
}

fn default_analyze_on_load() -> bool {
    true
}

fn default_analysis_timeout() -> u64 {
    20
}
