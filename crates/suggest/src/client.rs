//! HTTP client for the completion backend.
//!
//! Wraps the OpenAI-compatible chat-completions endpoint using [`reqwest`].
//! One request is issued per inbound gift-idea call; the client-level
//! timeout bounds it so a stalled backend degrades to the fallback instead
//! of hanging the caller.

use std::time::Duration;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Default chat-completions base URL.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds. Deliberately conservative: the
/// caller is an interactive form.
const DEFAULT_TIMEOUT_SECS: u64 = 8;

/// Configuration for the completion backend.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of the OpenAI-compatible API.
    pub api_url: String,
    /// Bearer credential.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl CompletionConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `GIFT_API_KEY` is not set, signalling that
    /// generation is not configured and the fallback templates should be
    /// used directly.
    ///
    /// | Variable            | Required | Default                      |
    /// |---------------------|----------|------------------------------|
    /// | `GIFT_API_KEY`      | yes      | —                            |
    /// | `GIFT_API_URL`      | no       | `https://api.openai.com/v1`  |
    /// | `GIFT_MODEL`        | no       | `gpt-4o-mini`                |
    /// | `GIFT_TIMEOUT_SECS` | no       | `8`                          |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GIFT_API_KEY").ok().filter(|k| !k.is_empty())?;
        Some(Self {
            api_url: std::env::var("GIFT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            api_key,
            model: std::env::var("GIFT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            timeout_secs: std::env::var("GIFT_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Errors from the completion backend. All of them are recovered by the
/// generator's fallback path; none reaches the caller as an error.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("completion backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, truncated for logging.
        body: String,
    },

    /// The backend's payload did not contain usable ideas.
    #[error("unusable completion payload: {0}")]
    MalformedPayload(String),
}

// ---------------------------------------------------------------------------
// CompletionApi
// ---------------------------------------------------------------------------

/// Shape of the chat-completions response, reduced to the single field the
/// generator reads.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// HTTP client for the completion backend.
pub struct CompletionApi {
    client: reqwest::Client,
    config: CompletionConfig,
}

impl CompletionApi {
    /// Create a new client. The timeout is applied at the client level so
    /// every request, including connection setup, is bounded.
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    /// Request one completion and return the assistant message content.
    ///
    /// Sends a `POST {api_url}/chat/completions` with a JSON response
    /// format, the given system instruction, and one user message.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, CompletionError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": 0.8,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let url = format!(
            "{}/chat/completions",
            self.config.api_url.trim_end_matches('/')
        );
        tracing::debug!(model = %self.config.model, %url, "Calling completion backend");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| CompletionError::MalformedPayload("no message content".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_env_returns_none_without_api_key() {
        std::env::remove_var("GIFT_API_KEY");
        assert!(CompletionConfig::from_env().is_none());
    }

    #[test]
    fn api_error_display_includes_status() {
        let err = CompletionError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert!(err.to_string().contains("429"));
    }
}
