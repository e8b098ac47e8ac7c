//! Analysis Module - Pure computations over estimation data.
//!
//! # Components
//!
//! - `compute_stats` - Average/min/max over the numeric votes of a round
//! - `StoryAnalysis` - Validated advisory estimate for a story
//!
//! Nothing here performs I/O. Calling the analysis service is the job of
//! the `StoryAnalyzer` port.

mod story_analysis;
mod vote_aggregator;

pub use story_analysis::{StoryAnalysis, MAX_COMPLEXITY, MIN_COMPLEXITY};
pub use vote_aggregator::{compute_stats, VoteStats};
