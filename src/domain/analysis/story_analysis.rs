//! Story analysis - the advisory estimate produced by the analysis service.
//!
//! Provider output is untrusted. It is decoded against a fixed schema and
//! checked before a `StoryAnalysis` exists; anything that does not fit is
//! rejected as a whole.

use serde::{Deserialize, Serialize};

use crate::domain::estimation::Card;
use crate::domain::foundation::{Timestamp, ValidationError};

/// Lowest complexity level shown to users.
pub const MIN_COMPLEXITY: u8 = 1;

/// Highest complexity level shown to users.
pub const MAX_COMPLEXITY: u8 = 10;

/// Wire shape expected from the analysis service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStoryAnalysis {
    suggested_points: String,
    reasoning: String,
    risks: Vec<String>,
    complexity_score: f64,
}

/// Advisory analysis of a story.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoryAnalysis {
    suggested_points: String,
    reasoning: String,
    risks: Vec<String>,
    complexity_score: f64,
    analyzed_at: Timestamp,
}

impl StoryAnalysis {
    /// Decodes and validates a JSON document from the analysis service.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the document does not match the schema or the
    ///   complexity score is not a finite number
    /// - `EmptyField` if the suggestion or the reasoning is blank
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        let raw: RawStoryAnalysis = serde_json::from_str(json)
            .map_err(|e| ValidationError::invalid_format("analysis", e.to_string()))?;

        Self::new(
            raw.suggested_points,
            raw.reasoning,
            raw.risks,
            raw.complexity_score,
        )
    }

    /// Builds an analysis from already-decoded parts.
    pub fn new(
        suggested_points: impl Into<String>,
        reasoning: impl Into<String>,
        risks: Vec<String>,
        complexity_score: f64,
    ) -> Result<Self, ValidationError> {
        let suggested_points = suggested_points.into().trim().to_string();
        if suggested_points.is_empty() {
            return Err(ValidationError::empty_field("suggestedPoints"));
        }

        let reasoning = reasoning.into().trim().to_string();
        if reasoning.is_empty() {
            return Err(ValidationError::empty_field("reasoning"));
        }

        if !complexity_score.is_finite() {
            return Err(ValidationError::invalid_format(
                "complexityScore",
                "must be a finite number",
            ));
        }

        let risks = risks
            .into_iter()
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect();

        Ok(Self {
            suggested_points,
            reasoning,
            risks,
            complexity_score,
            analyzed_at: Timestamp::now(),
        })
    }

    /// The suggestion exactly as the service returned it.
    pub fn suggested_points(&self) -> &str {
        &self.suggested_points
    }

    /// The suggestion as a card, if it names one from the deck.
    pub fn suggested_card(&self) -> Option<Card> {
        self.suggested_points.parse().ok()
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    /// Risks in the order the service listed them.
    pub fn risks(&self) -> &[String] {
        &self.risks
    }

    /// Raw score; the service is asked for 1-10 but does not guarantee it.
    pub fn complexity_score(&self) -> f64 {
        self.complexity_score
    }

    /// Score rounded and clamped into `MIN_COMPLEXITY..=MAX_COMPLEXITY`.
    pub fn complexity_level(&self) -> u8 {
        self.complexity_score
            .round()
            .clamp(MIN_COMPLEXITY as f64, MAX_COMPLEXITY as f64) as u8
    }

    pub fn analyzed_at(&self) -> &Timestamp {
        &self.analyzed_at
    }
}
