//! HTTP client for the OpenAI-compatible chat-completion endpoint.

use std::time::Duration;

use reqwest::{Client, Url};
use serde_json::{json, Value};

use leadlens_core::AppConfig;

use crate::error::LlmError;

/// Client for `POST /v1/chat/completions`.
///
/// Use [`ChatClient::new`] for production or [`ChatClient::with_base_url`]
/// to point at a mock server in tests.
pub struct ChatClient {
    client: Client,
    base_url: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl ChatClient {
    /// Creates a client pointed at the configured completion API.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError`] if the HTTP client cannot be constructed or the
    /// configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, LlmError> {
        Self::with_base_url(config, &config.llm_base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`ChatClient::new`].
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| LlmError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.llm_api_key.clone(),
            model: config.llm_model.clone(),
            max_tokens: config.llm_max_tokens,
        })
    }

    /// Sends one completion request and returns the assistant's text.
    ///
    /// # Errors
    ///
    /// - [`LlmError::UnexpectedStatus`] — non-2xx response.
    /// - [`LlmError::MalformedResponse`] — body is not valid JSON or lacks
    ///   `choices[0].message.content`.
    /// - [`LlmError::Http`] — network failure.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let url = self
            .base_url
            .join("v1/chat/completions")
            .map_err(|e| LlmError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        let req_body = json!({
            "model": self.model,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user }
            ]
        });

        let response = self
            .client
            .post(url.clone())
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        body.get("choices")
            .and_then(Value::as_array)
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                LlmError::MalformedResponse("missing choices[0].message.content".to_string())
            })
    }
}
