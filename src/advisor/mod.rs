//! AI exhibition advisor.
//!
//! Thin façade over an external generative-language service: one
//! conversational session per page lifetime, a fixed consultant persona and
//! an append-only transcript. The service is stateless with respect to
//! pricing; it never sees the rate card.

pub mod client;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod session;

// Re-export commonly used items
pub use client::{ChatModel, GeminiClient};
pub use routes::router;
pub use session::{ChatMessage, ChatRole, SessionService};

/// Persona instruction sent with every model call.
pub const SYSTEM_PROMPT: &str = "You are a high-end Exhibition Success Consultant. \
Your goal is to help clients maximize their brand impact within their chosen exhibition space. \
Do not discuss technical discount percentages or specific \"per square meter\" price drops. \
Instead, focus on the value of the total investment, space optimization, and booth design strategies that drive engagement. \
Help them understand that larger spaces offer better economies of scale for their brand presence. \
Be inspiring, professional, and focused on the client's marketing goals.";

/// First transcript entry of every new session.
pub const GREETING: &str = "Hello! I am your AI Exhibition Consultant. \
How can I help you optimize your exhibition design and costs today?";

/// Reply substituted when the backend fails.
pub const FALLBACK_REPLY: &str =
    "I'm sorry, I'm having trouble connecting right now. Please try again.";

/// Advisor error types
#[derive(Debug, thiserror::Error)]
pub enum AdvisorError {
    #[error("advisor backend is not configured")]
    NotConfigured,

    #[error("advisor transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("advisor returned an empty reply")]
    EmptyReply,

    #[error("chat session not found")]
    SessionNotFound,

    #[error("a message for this session is already being answered")]
    Busy,

    #[error("message text must not be empty")]
    EmptyMessage,
}
