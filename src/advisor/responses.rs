//! Response DTOs for advisor API endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::advisor::session::ChatMessage;

/// Newly opened session with its seeded transcript
#[derive(Debug, Serialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

/// Transcript snapshot
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
}

/// Reply to one user turn (real or fallback)
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    pub reply: ChatMessage,
}

/// Generic advisor error response
#[derive(Debug, Serialize)]
pub struct AdvisorErrorResponse {
    pub error_type: String,
    pub message: String,
}
