//! HTTP handlers for estimation endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::application::handlers::estimation::{
    AnalyzeStoryHandler, AnalyzeStoryQuery, CastVoteCommand, CastVoteHandler, CloseSessionCommand,
    CloseSessionHandler,
    CreateSessionCommand, CreateSessionHandler, GetSessionHandler, GetSessionQuery,
    JoinSessionCommand, JoinSessionHandler, LeaveSessionCommand, LeaveSessionHandler,
    LoadStoryCommand, LoadStoryHandler, RecordFinalEstimateCommand, RecordFinalEstimateHandler,
    ResetRoundCommand, ResetRoundHandler, RevealCardsCommand, RevealCardsHandler,
};
use crate::application::handlers::estimation::SessionLocks;
use crate::config::EstimationConfig;
use crate::domain::estimation::{EstimationError, EstimationSession};
use crate::domain::foundation::{ParticipantId, SessionId};
use crate::ports::{EstimationSessionRepository, StoryAnalyzer};

use super::dto::{
    AnalysisEnvelope, AnalysisResponse, CastVoteRequest, CreateSessionRequest,
    CreateSessionResponse, ErrorResponse, FinalEstimateRequest, JoinSessionRequest,
    JoinSessionResponse, LoadStoryRequest, LoadStoryResponse, SessionResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct EstimationHandlers {
    pub create_handler: Arc<CreateSessionHandler>,
    pub get_handler: Arc<GetSessionHandler>,
    pub close_handler: Arc<CloseSessionHandler>,
    pub join_handler: Arc<JoinSessionHandler>,
    pub leave_handler: Arc<LeaveSessionHandler>,
    pub cast_vote_handler: Arc<CastVoteHandler>,
    pub reveal_handler: Arc<RevealCardsHandler>,
    pub reset_handler: Arc<ResetRoundHandler>,
    pub load_story_handler: Arc<LoadStoryHandler>,
    pub final_estimate_handler: Arc<RecordFinalEstimateHandler>,
    pub analyze_handler: Arc<AnalyzeStoryHandler>,
}

impl EstimationHandlers {
    /// Wires every command handler over one repository and one lock registry.
    pub fn new(
        repository: Arc<dyn EstimationSessionRepository>,
        analyzer: Arc<dyn StoryAnalyzer>,
        config: &EstimationConfig,
    ) -> Self {
        let locks = Arc::new(SessionLocks::new());
        let analyze_handler = Arc::new(
            AnalyzeStoryHandler::new(repository.clone(), analyzer)
                .with_deadline(config.analysis_timeout()),
        );

        let mut load_story_handler = LoadStoryHandler::new(repository.clone(), locks.clone());
        if config.analyze_on_load {
            load_story_handler = load_story_handler.with_analysis(analyze_handler.clone());
        }

        Self {
            create_handler: Arc::new(CreateSessionHandler::new(repository.clone())),
            get_handler: Arc::new(GetSessionHandler::new(repository.clone())),
            close_handler: Arc::new(CloseSessionHandler::new(repository.clone(), locks.clone())),
            join_handler: Arc::new(JoinSessionHandler::new(repository.clone(), locks.clone())),
            leave_handler: Arc::new(LeaveSessionHandler::new(repository.clone(), locks.clone())),
            cast_vote_handler: Arc::new(CastVoteHandler::new(repository.clone(), locks.clone())),
            reveal_handler: Arc::new(RevealCardsHandler::new(
                repository.clone(),
                locks.clone(),
                config.reveal_policy(),
            )),
            reset_handler: Arc::new(ResetRoundHandler::new(repository.clone(), locks.clone())),
            load_story_handler: Arc::new(load_story_handler),
            final_estimate_handler: Arc::new(RecordFinalEstimateHandler::new(repository, locks)),
            analyze_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions - Open a session on a first story
pub async fn create_session(
    State(handlers): State<EstimationHandlers>,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Response {
    let req = match json_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = CreateSessionCommand {
        host_name: req.host_name,
        story_title: req.title,
        story_description: req.description,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(result) => {
            let response = CreateSessionResponse {
                host_id: result.host_id.to_string(),
                session: (&result.session).into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_estimation_error(e),
    }
}

/// GET /api/sessions/:id - Current session snapshot
pub async fn get_session(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers.get_handler.handle(GetSessionQuery { session_id }).await;
    session_response(result, StatusCode::OK)
}

/// DELETE /api/sessions/:id - Close a session and drop its state
pub async fn close_session(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .close_handler
        .handle(CloseSessionCommand { session_id })
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => handle_estimation_error(e),
    }
}

/// POST /api/sessions/:id/participants - Join a session
pub async fn join_session(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
    payload: Result<Json<JoinSessionRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let req = match json_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = JoinSessionCommand {
        session_id,
        name: req.name,
    };

    match handlers.join_handler.handle(cmd).await {
        Ok(result) => {
            let response = JoinSessionResponse {
                participant_id: result.participant_id.to_string(),
                session: (&result.session).into(),
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_estimation_error(e),
    }
}

/// DELETE /api/sessions/:id/participants/:participant_id - Leave a session
pub async fn leave_session(
    State(handlers): State<EstimationHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = LeaveSessionCommand {
        session_id,
        participant_id,
    };

    session_response(handlers.leave_handler.handle(cmd).await, StatusCode::OK)
}

/// PUT /api/sessions/:id/participants/:participant_id/vote - Cast a vote
pub async fn cast_vote(
    State(handlers): State<EstimationHandlers>,
    Path((session_id, participant_id)): Path<(String, String)>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Response {
    let (session_id, participant_id) = match parse_ids(&session_id, &participant_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let req = match json_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = CastVoteCommand {
        session_id,
        participant_id,
        card: req.card,
    };

    session_response(handlers.cast_vote_handler.handle(cmd).await, StatusCode::OK)
}

/// POST /api/sessions/:id/reveal - Reveal the cards
pub async fn reveal_cards(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .reveal_handler
        .handle(RevealCardsCommand { session_id })
        .await;
    session_response(result, StatusCode::OK)
}

/// POST /api/sessions/:id/reset - Start a fresh round
pub async fn reset_round(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = handlers
        .reset_handler
        .handle(ResetRoundCommand { session_id })
        .await;
    session_response(result, StatusCode::OK)
}

/// POST /api/sessions/:id/story - Load the next story
pub async fn load_story(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
    payload: Result<Json<LoadStoryRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let req = match json_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = LoadStoryCommand {
        session_id,
        title: req.title,
        description: req.description,
    };

    match handlers.load_story_handler.handle(cmd).await {
        Ok(result) => {
            let response = LoadStoryResponse {
                session: (&result.session).into(),
                analysis: result.analysis.as_ref().map(AnalysisResponse::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_estimation_error(e),
    }
}

/// POST /api/sessions/:id/final-estimate - Record the agreed estimate
pub async fn record_final_estimate(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
    payload: Result<Json<FinalEstimateRequest>, JsonRejection>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let req = match json_body(payload) {
        Ok(req) => req,
        Err(response) => return response,
    };

    let cmd = RecordFinalEstimateCommand {
        session_id,
        estimate: req.estimate,
    };

    session_response(
        handlers.final_estimate_handler.handle(cmd).await,
        StatusCode::OK,
    )
}

/// GET /api/sessions/:id/analysis - Advisory estimate for the current story
pub async fn analyze_story(
    State(handlers): State<EstimationHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .analyze_handler
        .handle(AnalyzeStoryQuery { session_id })
        .await
    {
        Ok(analysis) => {
            let response = AnalysisEnvelope {
                analysis: analysis.as_ref().map(AnalysisResponse::from),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_estimation_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn parse_ids(session_id: &str, participant_id: &str) -> Result<(SessionId, ParticipantId), Response> {
    let session_id = parse_session_id(session_id)?;
    let participant_id = participant_id.parse::<ParticipantId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid participant ID")),
        )
            .into_response()
    })?;
    Ok((session_id, participant_id))
}

/// Malformed or incomplete bodies become the standard 400 error body.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(handle_estimation_error(EstimationError::invalid_input(
            "body",
            rejection.body_text(),
        ))),
    }
}

fn session_response(result: Result<EstimationSession, EstimationError>, status: StatusCode) -> Response {
    match result {
        Ok(session) => (status, Json(SessionResponse::from(&session))).into_response(),
        Err(e) => handle_estimation_error(e),
    }
}

/// Maps estimation errors to HTTP responses.
fn handle_estimation_error(error: EstimationError) -> Response {
    match error {
        EstimationError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", &id.to_string())),
        )
            .into_response(),
        EstimationError::InvalidInput { ref field, .. } => {
            let body = ErrorResponse::bad_request(error.to_string())
                .with_details(json!({ "field": field }));
            (StatusCode::BAD_REQUEST, Json(body)).into_response()
        }
        EstimationError::InvalidTransition { state, .. } => {
            let body = ErrorResponse::conflict(error.to_string())
                .with_details(json!({ "state": state }));
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
        EstimationError::Infrastructure(ref message) => {
            tracing::error!(error = %message, "estimation request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An internal error occurred")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::estimation::EstimationState;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_estimation_error(EstimationError::not_found(SessionId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let response = handle_estimation_error(EstimationError::invalid_input("vote", "bad card"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_transition_maps_to_409() {
        let response = handle_estimation_error(EstimationError::invalid_transition(
            EstimationState::Revealed,
            "cast a vote",
            "start a new round first",
        ));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_estimation_error(EstimationError::infrastructure("disk"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn body_rejection_becomes_error_response() {
        use axum::body::{to_bytes, Body};
        use axum::extract::FromRequest;
        use axum::http::Request;

        let request = Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"title": "only a title"}"#))
            .unwrap();
        let payload = Json::<LoadStoryRequest>::from_request(request, &()).await;

        let response = match json_body(payload) {
            Ok(_) => panic!("incomplete body was accepted"),
            Err(response) => response,
        };
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert_eq!(body["details"]["field"], "body");
    }

    #[test]
    fn malformed_ids_are_rejected() {
        assert!(parse_session_id("not-a-uuid").is_err());
        assert!(parse_ids(&SessionId::new().to_string(), "nope").is_err());
    }
}
