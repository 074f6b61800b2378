//! Advisor chat sessions.
//!
//! One session per page lifetime, keyed by UUID and held in an in-memory
//! cache with idle eviction. Each transcript is append-only and has a single
//! writer at a time: a per-session lock serializes sends, and a concurrent
//! send is rejected as busy rather than queued.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

use crate::advisor::client::ChatModel;
use crate::advisor::{AdvisorError, FALLBACK_REPLY, GREETING, SYSTEM_PROMPT};

/// Speaker of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    /// Role string used by the generative-language wire format.
    pub fn wire_name(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

/// One transcript entry. Entries are appended, never edited or removed.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn now(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

#[derive(Debug, Default)]
struct Session {
    transcript: Vec<ChatMessage>,
}

type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session store.
///
/// Sessions are ephemeral; capacity and idle eviction bound memory without
/// any persistence.
pub struct SessionStore {
    sessions: Cache<Uuid, SessionHandle>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            // 1024 concurrent visitors, 2 h lifetime, 30 min idle
            sessions: Cache::builder()
                .max_capacity(1024)
                .time_to_live(Duration::from_secs(2 * 60 * 60))
                .time_to_idle(Duration::from_secs(30 * 60))
                .build(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Chat advisor service: one transcript per session, at most one in-flight
/// model call per session.
pub struct SessionService<M> {
    model: M,
    store: SessionStore,
    system_prompt: String,
}

impl<M: ChatModel> SessionService<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            store: SessionStore::new(),
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    /// Open a new session seeded with the advisor greeting.
    pub async fn create(&self) -> (Uuid, Vec<ChatMessage>) {
        let id = Uuid::new_v4();
        let session = Session {
            transcript: vec![ChatMessage::now(ChatRole::Model, GREETING)],
        };
        let snapshot = session.transcript.clone();
        self.store
            .sessions
            .insert(id, Arc::new(Mutex::new(session)))
            .await;
        (id, snapshot)
    }

    /// Snapshot of a session transcript.
    pub async fn transcript(&self, id: Uuid) -> Result<Vec<ChatMessage>, AdvisorError> {
        let handle = self.handle(id).await?;
        let guard = handle.lock().await;
        Ok(guard.transcript.clone())
    }

    /// Forward one user message and append the model reply.
    ///
    /// Exactly two messages are appended per accepted call: the user text,
    /// then the model reply, or the fixed fallback if the backend fails.
    /// Prior transcript entries are never touched. Returns [`AdvisorError::Busy`]
    /// while a previous send for the same session is still in flight.
    pub async fn send(&self, id: Uuid, text: &str) -> Result<ChatMessage, AdvisorError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorError::EmptyMessage);
        }

        let handle = self.handle(id).await?;
        // The lock doubles as the busy flag: it is held across the model
        // round-trip, and a concurrent send must not wait behind it.
        let mut guard = handle.try_lock().map_err(|_| AdvisorError::Busy)?;

        guard.transcript.push(ChatMessage::now(ChatRole::User, text));
        let reply_text = match self.model.reply(&self.system_prompt, &guard.transcript).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(session = %id, error = %err, "advisor backend failed, substituting fallback");
                FALLBACK_REPLY.to_string()
            }
        };
        let reply = ChatMessage::now(ChatRole::Model, reply_text);
        guard.transcript.push(reply.clone());
        Ok(reply)
    }

    async fn handle(&self, id: Uuid) -> Result<SessionHandle, AdvisorError> {
        self.store
            .sessions
            .get(&id)
            .await
            .ok_or(AdvisorError::SessionNotFound)
    }
}
