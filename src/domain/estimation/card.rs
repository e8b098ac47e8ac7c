//! Card value object - the closed set of permitted vote tokens.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A planning poker card.
///
/// Fibonacci-like numeric cards plus two special cards: `?` (the voter
/// cannot estimate) and `☕` (the voter needs a break). Serialized as the
/// exact token printed on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    #[serde(rename = "0")]
    Zero,
    #[serde(rename = "0.5")]
    Half,
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "8")]
    Eight,
    #[serde(rename = "13")]
    Thirteen,
    #[serde(rename = "21")]
    TwentyOne,
    #[serde(rename = "34")]
    ThirtyFour,
    #[serde(rename = "55")]
    FiftyFive,
    #[serde(rename = "89")]
    EightyNine,
    #[serde(rename = "?")]
    Unknown,
    #[serde(rename = "☕")]
    Break,
}

impl Card {
    /// The full deck in display order.
    pub const ALL: [Card; 14] = [
        Card::Zero,
        Card::Half,
        Card::One,
        Card::Two,
        Card::Three,
        Card::Five,
        Card::Eight,
        Card::Thirteen,
        Card::TwentyOne,
        Card::ThirtyFour,
        Card::FiftyFive,
        Card::EightyNine,
        Card::Unknown,
        Card::Break,
    ];

    /// Returns the token printed on the card.
    pub fn as_str(&self) -> &'static str {
        match self {
            Card::Zero => "0",
            Card::Half => "0.5",
            Card::One => "1",
            Card::Two => "2",
            Card::Three => "3",
            Card::Five => "5",
            Card::Eight => "8",
            Card::Thirteen => "13",
            Card::TwentyOne => "21",
            Card::ThirtyFour => "34",
            Card::FiftyFive => "55",
            Card::EightyNine => "89",
            Card::Unknown => "?",
            Card::Break => "☕",
        }
    }

    /// Numeric value of the card, `None` for `?` and `☕`.
    pub fn numeric_value(&self) -> Option<f64> {
        match self {
            Card::Zero => Some(0.0),
            Card::Half => Some(0.5),
            Card::One => Some(1.0),
            Card::Two => Some(2.0),
            Card::Three => Some(3.0),
            Card::Five => Some(5.0),
            Card::Eight => Some(8.0),
            Card::Thirteen => Some(13.0),
            Card::TwentyOne => Some(21.0),
            Card::ThirtyFour => Some(34.0),
            Card::FiftyFive => Some(55.0),
            Card::EightyNine => Some(89.0),
            Card::Unknown | Card::Break => None,
        }
    }

    /// Returns true for cards that take part in numeric aggregation.
    pub fn is_numeric(&self) -> bool {
        self.numeric_value().is_some()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Card {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Card::ALL
            .iter()
            .copied()
            .find(|card| card.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "vote",
                    format!("'{}' is not a card in the deck", s),
                )
            })
    }
}
