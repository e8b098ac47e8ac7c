//! Estimation session command and query handlers.
//!
//! Every mutating handler goes through `SessionLocks`, so at most one
//! write per session is in flight; reads and analysis run unlocked.

mod analyze_story;
mod cast_vote;
mod close_session;
mod create_session;
mod get_session;
mod join_session;
mod leave_session;
mod load_story;
mod record_final_estimate;
mod reset_round;
mod reveal_cards;
mod session_locks;

pub use analyze_story::{AnalyzeStoryHandler, AnalyzeStoryQuery};
pub use cast_vote::{CastVoteCommand, CastVoteHandler};
pub use close_session::{CloseSessionCommand, CloseSessionHandler};
pub use create_session::{CreateSessionCommand, CreateSessionHandler, CreateSessionResult};
pub use get_session::{GetSessionHandler, GetSessionQuery};
pub use join_session::{JoinSessionCommand, JoinSessionHandler, JoinSessionResult};
pub use leave_session::{LeaveSessionCommand, LeaveSessionHandler};
pub use load_story::{LoadStoryCommand, LoadStoryHandler, LoadStoryResult};
pub use record_final_estimate::{RecordFinalEstimateCommand, RecordFinalEstimateHandler};
pub use reset_round::{ResetRoundCommand, ResetRoundHandler};
pub use reveal_cards::{RevealCardsCommand, RevealCardsHandler};
pub use session_locks::SessionLocks;
