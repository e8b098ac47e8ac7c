//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers serialize writes per session; query handlers read the
//! latest stored snapshot.

pub mod handlers;

pub use handlers::estimation::{
    AnalyzeStoryHandler, AnalyzeStoryQuery, CastVoteCommand, CastVoteHandler,
    CloseSessionCommand, CloseSessionHandler,
    CreateSessionCommand, CreateSessionHandler, CreateSessionResult, GetSessionHandler,
    GetSessionQuery, JoinSessionCommand, JoinSessionHandler, JoinSessionResult,
    LeaveSessionCommand, LeaveSessionHandler, LoadStoryCommand, LoadStoryHandler,
    LoadStoryResult, RecordFinalEstimateCommand, RecordFinalEstimateHandler, ResetRoundCommand,
    ResetRoundHandler, RevealCardsCommand, RevealCardsHandler, SessionLocks,
};
