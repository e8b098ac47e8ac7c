//! Story entity - the unit of work being estimated.

use serde::{Deserialize, Serialize};

use super::Card;
use crate::domain::foundation::{StoryId, ValidationError};

/// Maximum length for a story title.
pub const MAX_TITLE_LENGTH: usize = 500;

/// A unit of work under estimation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    id: StoryId,
    title: String,
    description: String,
    final_estimate: Option<Card>,
}

impl Story {
    /// Creates a new story with no final estimate.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or description is blank after trimming
    /// - `InvalidFormat` if the title is too long
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let story = Self {
            id: StoryId::new(),
            title: title.into(),
            description: description.into(),
            final_estimate: None,
        };
        story.validate()?;
        Ok(story)
    }

    /// Reconstitute a story from storage (no validation).
    pub fn reconstitute(
        id: StoryId,
        title: String,
        description: String,
        final_estimate: Option<Card>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            final_estimate,
        }
    }

    pub fn id(&self) -> StoryId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn final_estimate(&self) -> Option<Card> {
        self.final_estimate
    }

    /// Checks the title/description invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::invalid_format(
                "title",
                format!("must be {} characters or less", MAX_TITLE_LENGTH),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::empty_field("description"));
        }
        Ok(())
    }

    pub(crate) fn with_final_estimate(&self, estimate: Card) -> Self {
        Self {
            final_estimate: Some(estimate),
            ..self.clone()
        }
    }
}
