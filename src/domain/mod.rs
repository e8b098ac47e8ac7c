//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `estimation` - Planning poker session, participants, stories and cards
//! - `analysis` - Pure computations (vote statistics, story analysis validation)

pub mod analysis;
pub mod estimation;
pub mod foundation;
