//! Reveal policy.

use serde::Deserialize;

/// Controls whether cards may be revealed before everyone has voted.
///
/// Strict by default: every participant must hold a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct RevealPolicy {
    #[serde(default)]
    pub allow_incomplete_reveal: bool,
}

impl RevealPolicy {
    /// Reveal only once every participant has voted.
    pub fn strict() -> Self {
        Self {
            allow_incomplete_reveal: false,
        }
    }

    /// Reveal whenever the host asks.
    pub fn permissive() -> Self {
        Self {
            allow_incomplete_reveal: true,
        }
    }
}
