//! DeepSeek chat-completions client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::ports::{InferenceEngine, InferenceMessage, InferenceRequest, InferenceResponse, TokenUsage};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Inference engine backed by the DeepSeek API
#[derive(Debug)]
pub struct DeepSeekInferenceEngine {
    client: Client,
    config: InferenceConfig,
}

impl DeepSeekInferenceEngine {
    /// Create a new DeepSeek inference engine
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        config.validate().map_err(InferenceError::RequestFailed)?;

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            request_url = %config.request_url,
            model = %config.default_model,
            "Initialized DeepSeek inference engine"
        );

        Ok(Self { client, config })
    }

    /// Get the model to use for a request
    fn resolve_model<'a>(&'a self, request: &'a InferenceRequest) -> &'a str {
        request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.config.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    fn map_transport_error(&self, err: &reqwest::Error) -> InferenceError {
        if err.is_timeout() {
            InferenceError::Timeout(self.config.timeout_ms)
        } else if err.is_connect() {
            InferenceError::ConnectionFailed(err.to_string())
        } else {
            InferenceError::RequestFailed(err.to_string())
        }
    }

    /// Convert a completion response body into an [`InferenceResponse`]
    fn parse_completion(body: &str, fallback_model: &str) -> Result<InferenceResponse, InferenceError> {
        let completion: ChatCompletionResponse =
            serde_json::from_str(body).map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| InferenceError::InvalidResponse("response has no choices".to_string()))?;

        Ok(InferenceResponse {
            content: choice.message.content.unwrap_or_default().trim().to_string(),
            model: completion
                .model
                .unwrap_or_else(|| fallback_model.to_string()),
            usage: completion.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
            finish_reason: choice.finish_reason,
        })
    }
}

/// OpenAI-format chat request
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [InferenceMessage],
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

/// OpenAI-format chat response
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[async_trait]
impl InferenceEngine for DeepSeekInferenceEngine {
    #[instrument(skip(self, request), fields(model = %self.resolve_model(&request)))]
    async fn generate(&self, request: InferenceRequest) -> Result<InferenceResponse, InferenceError> {
        let model = self.resolve_model(&request);

        let body = ChatCompletionRequest {
            model,
            messages: &request.messages,
            temperature: request.temperature.unwrap_or(self.config.temperature),
            max_tokens: request.max_tokens.unwrap_or(self.config.max_tokens),
            stream: false,
        };

        debug!(messages = request.messages.len(), "Sending chat completion request");

        let response = self
            .authorize(self.client.post(&self.config.request_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let status = response.status();
        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(InferenceError::RateLimited),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(InferenceError::Unauthorized(format!("HTTP {status}")));
            },
            s if !s.is_success() => {
                let body = response.text().await.unwrap_or_default();
                warn!(status = %status, body = %body, "Inference request failed");
                return Err(InferenceError::ServerError(format!(
                    "Status {}: {}",
                    status.as_u16(),
                    body
                )));
            },
            _ => {},
        }

        let text = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&e))?;

        let result = Self::parse_completion(&text, model)?;

        debug!(
            tokens = ?result.usage,
            finish_reason = ?result.finish_reason,
            "Inference completed"
        );

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<bool, InferenceError> {
        let response = self
            .authorize(self.client.get(self.config.models_url()))
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() || e.is_connect() => Ok(false),
            Err(e) => Err(InferenceError::RequestFailed(e.to_string())),
        }
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
