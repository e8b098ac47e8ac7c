//! HTTP adapter for estimation sessions.

pub mod dto;
mod handlers;
mod routes;

pub use handlers::EstimationHandlers;
pub use routes::estimation_routes;
