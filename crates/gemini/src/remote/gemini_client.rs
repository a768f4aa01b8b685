use async_trait::async_trait;
use common::SignalError;
use reqwest::{Client, StatusCode};
use tracing::{debug, error};

use crate::config::GeminiConfig;
use crate::remote::generate_request::GenerateContentRequest;
use crate::remote::generate_response::{ApiErrorResponse, GenerateContentResponse};
use crate::traits::TextGenerator;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// No request timeout is set; a call runs until the provider answers or
    /// the connection fails.
    pub fn new(config: GeminiConfig) -> Result<Self, SignalError> {
        let client = Client::builder()
            .user_agent(concat!("stock-signal/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                SignalError::NetworkOrService(format!("failed to build HTTP client: {e}"))
            })?;

        Ok(Self::with_http_client(config, client))
    }

    pub fn with_http_client(config: GeminiConfig, client: Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    pub fn request_body(&self, prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest::json_prompt(prompt, self.config.temperature)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, SignalError> {
        let url = self.config.generate_url();
        debug!(model = %self.config.model, "Calling generateContent");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| SignalError::NetworkOrService(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = provider_error_message(status, &body);
            error!("Gemini request failed: {}", message);
            return Err(SignalError::NetworkOrService(message));
        }

        let envelope = resp.json::<GenerateContentResponse>().await.map_err(|e| {
            SignalError::NetworkOrService(format!("failed to decode response: {e}"))
        })?;

        envelope.text().map_err(SignalError::NetworkOrService)
    }
}

/// Prefers the provider's own error message; falls back to the raw body.
pub fn provider_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(parsed) => parsed.error.describe(),
        Err(_) if body.trim().is_empty() => format!("HTTP {status}"),
        Err(_) => format!("HTTP {status}: {}", body.trim()),
    }
}
