use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::config::AppConfig;

/// Fixed system instruction framing the assistant before every user turn.
const SYSTEM_PROMPT: &str = "You are CampusMate, the guidance assistant of a college portal. \
     You help students with academics, library resources, exam preparation, and campus life. \
     Keep answers short, friendly, and practical.";

/// ChatError
///
/// The failure domain of the chat-completion call. All variants surface to
/// the client as the same generic apology; the distinction exists for the
/// server-side log line.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("chat upstream returned no completion choices")]
    EmptyCompletion,
}

/// ChatService Contract
///
/// Abstract contract for the external completion provider. The concrete
/// client talks HTTP; the mock makes the chat handler testable without a
/// network, exactly as the repository trait does for the data store.
#[async_trait]
pub trait ChatService: Send + Sync {
    /// Forwards one sanitized user turn, preceded by the fixed system
    /// persona, and returns the completion text. No retry, no timeout
    /// beyond the HTTP client's defaults, no streaming.
    async fn complete(&self, message: &str) -> Result<String, ChatError>;
}

/// ChatState
///
/// The concrete type used to share the chat service across the application state.
pub type ChatState = Arc<dyn ChatService>;

// --- Wire Schemas (completion endpoint) ---

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// ChatCompletionClient
///
/// The reqwest-backed implementation against an OpenAI-style
/// chat-completions endpoint. One request per call; the await suspends only
/// this request's task, never the server's ability to take other requests.
pub struct ChatCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl ChatCompletionClient {
    /// Constructs the client from the loaded configuration.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.chat_api_url.clone(),
            api_key: config.chat_api_key.clone(),
            model: config.chat_model.clone(),
        }
    }
}

#[async_trait]
impl ChatService for ChatCompletionClient {
    async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": message },
            ],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            // Quota exhaustion and auth failures land here as well.
            return Err(ChatError::UpstreamStatus(response.status().as_u16()));
        }

        let completion = response.json::<CompletionResponse>().await?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(ChatError::EmptyCompletion)
    }
}

/// MockChatService
///
/// A mock implementation of `ChatService` used exclusively for tests. The
/// reply is pre-canned; `should_fail` simulates an upstream outage.
#[derive(Clone)]
pub struct MockChatService {
    pub should_fail: bool,
    pub reply: String,
}

impl MockChatService {
    pub fn new(reply: &str) -> Self {
        Self {
            should_fail: false,
            reply: reply.to_string(),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            reply: String::new(),
        }
    }
}

#[async_trait]
impl ChatService for MockChatService {
    async fn complete(&self, _message: &str) -> Result<String, ChatError> {
        if self.should_fail {
            return Err(ChatError::UpstreamStatus(503));
        }
        Ok(self.reply.clone())
    }
}
