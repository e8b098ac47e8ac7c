//! HTTP routes for estimation endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    analyze_story, cast_vote, close_session, create_session, get_session, join_session, leave_session,
    load_story, record_final_estimate, reset_round, reveal_cards, EstimationHandlers,
};

/// Creates the estimation router with all endpoints, mounted under `/api/sessions`.
pub fn estimation_routes(handlers: EstimationHandlers) -> Router {
    Router::new()
        .route("/api/sessions", post(create_session))
        .route("/api/sessions/:id", get(get_session).delete(close_session))
        .route("/api/sessions/:id/participants", post(join_session))
        .route(
            "/api/sessions/:id/participants/:participant_id",
            delete(leave_session),
        )
        .route(
            "/api/sessions/:id/participants/:participant_id/vote",
            put(cast_vote),
        )
        .route("/api/sessions/:id/reveal", post(reveal_cards))
        .route("/api/sessions/:id/reset", post(reset_round))
        .route("/api/sessions/:id/story", post(load_story))
        .route("/api/sessions/:id/final-estimate", post(record_final_estimate))
        .route("/api/sessions/:id/analysis", get(analyze_story))
        .with_state(handlers)
}
