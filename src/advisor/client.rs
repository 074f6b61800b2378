//! Chat backend clients.
//!
//! The session service is generic over [`ChatModel`], so tests drive it with
//! a scripted model while the binary wires in the Gemini REST client.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::advisor::session::ChatMessage;
use crate::advisor::AdvisorError;
use crate::config::AdvisorConfig;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Conversational model behind the advisor panel.
pub trait ChatModel: Send + Sync {
    /// Produce the next model reply for the given transcript.
    ///
    /// The transcript already contains the user message being answered.
    fn reply(
        &self,
        system_prompt: &str,
        transcript: &[ChatMessage],
    ) -> impl Future<Output = Result<String, AdvisorError>> + Send;
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: &AdvisorConfig, http: reqwest::Client) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: GEMINI_API_BASE.to_string(),
        }
    }
}

impl ChatModel for GeminiClient {
    async fn reply(
        &self,
        system_prompt: &str,
        transcript: &[ChatMessage],
    ) -> Result<String, AdvisorError> {
        let api_key = self.api_key.as_deref().ok_or(AdvisorError::NotConfigured)?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        let body = GenerateContentRequest {
            system_instruction: RequestContent {
                role: None,
                parts: vec![RequestPart {
                    text: system_prompt,
                }],
            },
            contents: transcript
                .iter()
                .map(|message| RequestContent {
                    role: Some(message.role.wire_name()),
                    parts: vec![RequestPart {
                        text: &message.text,
                    }],
                })
                .collect(),
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AdvisorError::EmptyReply);
        }
        Ok(text)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: RequestContent<'a>,
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}
