//! HTTP client for the Gemini `generateContent` endpoint

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::GeminiConfig;
use crate::error::{CompletionError, CompletionResult};

use super::models::{CompletionRequest, GenerateContentRequest, GenerateContentResponse};
use super::CompletionService;

/// Maximum error body size kept in [`CompletionError::Api`]
const MAX_ERROR_BODY_SIZE: usize = 1000;

/// Header carrying the API key
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Completion service backed by the Gemini REST API. One request per call,
/// no retries.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http_client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    /// Create a new client from configuration
    pub fn new(config: &GeminiConfig) -> CompletionResult<Self> {
        let mut builder = Client::builder().connect_timeout(Duration::from_secs(10));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(CompletionError::Http)?;

        Ok(Self {
            http_client,
            config: config.clone(),
        })
    }

    /// Truncate error body on a UTF-8 boundary
    fn truncate_error_body(body: String) -> String {
        if body.len() <= MAX_ERROR_BODY_SIZE {
            return body;
        }

        let truncate_at = body
            .char_indices()
            .map(|(i, _)| i)
            .take_while(|i| *i <= MAX_ERROR_BODY_SIZE)
            .last()
            .unwrap_or(0);

        format!("{}... (truncated)", &body[..truncate_at])
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn generate_json(&self, request: &CompletionRequest) -> CompletionResult<String> {
        debug!(
            model = %self.config.model,
            prompt_len = request.prompt.len(),
            "Sending completion request"
        );

        let body = GenerateContentRequest::json_prompt(request);
        let response = self
            .http_client
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    CompletionError::ConnectionRefused(self.config.base_url.clone())
                } else if e.is_timeout() {
                    CompletionError::Timeout(self.config.timeout_secs.unwrap_or_default())
                } else {
                    CompletionError::Http(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = Self::truncate_error_body(response.text().await.unwrap_or_default());
            return Err(CompletionError::Api { status, body });
        }

        let envelope: GenerateContentResponse = response.json().await?;
        if let Some(reason) = envelope.block_reason() {
            return Err(CompletionError::Blocked(reason.to_string()));
        }

        let text = envelope.text().ok_or(CompletionError::EmptyResponse)?;
        debug!(response_len = text.len(), "Completion received");
        Ok(text)
    }
}
