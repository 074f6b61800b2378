//! Advisor API route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::advisor::requests::SendMessageRequest;
use crate::advisor::responses::{
    AdvisorErrorResponse, ReplyResponse, SessionCreatedResponse, TranscriptResponse,
};
use crate::advisor::AdvisorError;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", get(transcript))
        .route("/sessions/:id/messages", post(send_message))
}

/// Open a new advisor session
async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let (session_id, messages) = state.advisor.create().await;
    Json(SessionCreatedResponse {
        session_id,
        messages,
    })
}

/// Transcript snapshot for an existing session
async fn transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TranscriptResponse>, AdvisorError> {
    let messages = state.advisor.transcript(id).await?;
    Ok(Json(TranscriptResponse {
        session_id: id,
        messages,
    }))
}

/// Forward one user message; the reply is the model's text or the fallback
async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SendMessageRequest>,
) -> Result<Json<ReplyResponse>, AdvisorError> {
    let reply = state.advisor.send(id, &request.message).await?;
    Ok(Json(ReplyResponse { reply }))
}

impl IntoResponse for AdvisorError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            AdvisorError::SessionNotFound => (StatusCode::NOT_FOUND, "session_not_found"),
            AdvisorError::Busy => (StatusCode::CONFLICT, "busy"),
            AdvisorError::EmptyMessage => (StatusCode::UNPROCESSABLE_ENTITY, "empty_message"),
            // backend failures are absorbed into the fallback reply inside
            // the session service; reaching here is unexpected
            AdvisorError::NotConfigured | AdvisorError::Transport(_) | AdvisorError::EmptyReply => {
                (StatusCode::BAD_GATEWAY, "advisor_unavailable")
            }
        };
        let body = AdvisorErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
