//! Estimation module - the planning poker session and its round lifecycle.
//!
//! # Lifecycle
//!
//! ```text
//!            reveal
//!   Voting ─────────▶ Revealed
//!     ▲  │               │
//!     └──┘ reset         │ reset
//!     ▲                  │
//!     └──────────────────┘
//!   load_story forces Voting from either state
//! ```

mod card;
mod errors;
mod estimation_state;
mod participant;
mod policy;
mod session;
mod story;

pub use card::Card;
pub use errors::EstimationError;
pub use estimation_state::EstimationState;
pub use participant::{Participant, MAX_NAME_LENGTH};
pub use policy::RevealPolicy;
pub use session::{EstimationSession, VotingProgress};
pub use story::{Story, MAX_TITLE_LENGTH};
