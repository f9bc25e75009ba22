use super::{CodeGenerator, LlmError};
use crate::config::LlmConfig;
use crate::util::truncate_str;
use serde::{Deserialize, Serialize};

/// OpenRouter chat-completions URL (default endpoint)
pub const OPENROUTER_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

const MAX_ERROR_BODY_CHARS: usize = 500;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

/// Client for an OpenRouter-compatible chat-completions API.
///
/// Holds its configuration by value; construct it once at startup and share
/// it. One call, no retries: a rejected or rate-limited request surfaces as
/// [`LlmError::Upstream`] for the caller to report.
pub struct LlmClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

impl CodeGenerator for LlmClient {
    async fn generate(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
        };

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Upstream {
                status: status.as_u16(),
                body: truncate_str(&body, MAX_ERROR_BODY_CHARS).to_string(),
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::MalformedResponse(format!(
                "{e}: {}",
                truncate_str(&body, MAX_ERROR_BODY_CHARS)
            ))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(LlmError::EmptyCompletion)
    }
}
