//! Request DTOs for advisor API endpoints.

use serde::Deserialize;

/// One user chat turn
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}
