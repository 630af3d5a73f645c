//! POST /ask: answers one question within a session.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
};
use contextor::Query;
use tracing::{debug, error};

use crate::{
    core::app_state::AppState,
    error_handler::{AppError, AppResult},
    routes::ask::ask_request::{AskRequest, AskResponse},
};

/// Handler: POST /ask
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:8000/ask \
///   -H 'content-type: application/json' \
///   -d '{"user_query":"What is the processing fee?","session_id":"abc"}'
/// ```
pub async fn ask_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Json<AskResponse>> {
    let request_id = headers
        .get("X-Request-Id")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    let Json(body) = payload?;
    let query: Query = body.into();

    debug!(
        request_id = %request_id,
        session_id = %query.session_id,
        "ask_route: start"
    );

    match state.assistant.handle(query).await {
        Ok(reply) => {
            debug!(
                request_id = %request_id,
                faq = reply.is_instant_faq,
                nudge = reply.nudge.is_some(),
                "ask_route: success"
            );
            Ok(Json(reply.into()))
        }
        Err(err) => {
            error!(
                request_id = %request_id,
                error = %err,
                "ask_route: failed"
            );
            Err(AppError::from(err))
        }
    }
}
