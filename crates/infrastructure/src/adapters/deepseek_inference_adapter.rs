//! DeepSeek inference adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{DeepSeekInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest};
use application::{
    error::ApplicationError,
    ports::{InferencePort, InferenceResult},
};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for DeepSeek chat completions
#[derive(Debug)]
pub struct DeepSeekInferenceAdapter {
    engine: DeepSeekInferenceEngine,
}

impl DeepSeekInferenceAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no API key is set or the engine
    /// cannot be built.
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        if config.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            return Err(ApplicationError::Configuration(
                "inference api_key is required".to_string(),
            ));
        }

        let engine = DeepSeekInferenceEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;

        Ok(Self { engine })
    }

    /// Convert ai_core error to application error
    fn map_error(e: InferenceError) -> ApplicationError {
        match e {
            InferenceError::RateLimited => ApplicationError::RateLimited,
            InferenceError::ConnectionFailed(msg) => {
                ApplicationError::ExternalService(format!("DeepSeek connection failed: {msg}"))
            },
            InferenceError::Timeout(ms) => {
                ApplicationError::ExternalService(format!("Inference timeout after {ms}ms"))
            },
            InferenceError::Unauthorized(msg) => {
                ApplicationError::Configuration(format!("DeepSeek rejected the API key: {msg}"))
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }
}

#[async_trait]
impl InferencePort for DeepSeekInferenceAdapter {
    #[instrument(skip(self, system_prompt, message), fields(message_len = message.len()))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        message: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        let start = Instant::now();

        let request = InferenceRequest::with_system(system_prompt, message);
        let response = self
            .engine
            .generate(request)
            .await
            .map_err(Self::map_error)?;

        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(
            model = %response.model,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            latency_ms = latency_ms,
            "Inference completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.engine.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.engine.default_model().to_string()
    }
}
