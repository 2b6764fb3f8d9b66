//! HTTP client for the hosted image-classification API.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{Client, Url};

use leadlens_core::AppConfig;

use crate::error::VisionError;
use crate::types::InferResponse;

/// Client for the hosted inference endpoint.
///
/// The wire contract is the Roboflow-style hosted API: POST the image as a
/// base64 string to `{base}/{model_id}?api_key=...` with a form-urlencoded
/// content type. Use [`VisionClient::new`] for production or
/// [`VisionClient::with_base_url`] to point at a mock server in tests.
pub struct VisionClient {
    client: Client,
    base_url: Url,
    api_key: String,
    model_id: String,
}

impl VisionClient {
    /// Creates a client pointed at the configured inference API.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError`] if the HTTP client cannot be constructed or
    /// the configured base URL does not parse.
    pub fn new(config: &AppConfig) -> Result<Self, VisionError> {
        Self::with_base_url(config, &config.vision_base_url)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// See [`VisionClient::new`].
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, VisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| VisionError::InvalidBaseUrl {
            base_url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            api_key: config.vision_api_key.clone(),
            model_id: config.vision_model_id.clone(),
        })
    }

    /// Classifies one image and returns the ranked predictions.
    ///
    /// # Errors
    ///
    /// - [`VisionError::UnexpectedStatus`] — non-2xx response.
    /// - [`VisionError::Deserialize`] — response body is not the expected JSON.
    /// - [`VisionError::Http`] — network failure.
    pub async fn classify(&self, image_bytes: &[u8]) -> Result<InferResponse, VisionError> {
        let mut url =
            self.base_url
                .join(&self.model_id)
                .map_err(|e| VisionError::InvalidBaseUrl {
                    base_url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        url.query_pairs_mut().append_pair("api_key", &self.api_key);

        let response = self
            .client
            .post(url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(BASE64.encode(image_bytes))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VisionError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<InferResponse>(&body).map_err(|e| VisionError::Deserialize {
            context: format!("inference response from model {}", self.model_id),
            source: e,
        })
    }
}
