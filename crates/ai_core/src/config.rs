//! Configuration for the chat-completion client

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the inference engine
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Full chat-completions endpoint URL
    #[serde(default = "default_request_url")]
    pub request_url: String,

    /// Bearer token sent with every request
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Default model to use
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for sampling (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// System prompt to use by default
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_request_url() -> String {
    "https://api.deepseek.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

const fn default_connect_timeout_ms() -> u64 {
    30_000
}

const fn default_timeout_ms() -> u64 {
    180_000 // model generation is slow
}

const fn default_max_tokens() -> u32 {
    1500
}

const fn default_temperature() -> f32 {
    0.5
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            request_url: default_request_url(),
            api_key: None,
            default_model: default_model(),
            connect_timeout_ms: default_connect_timeout_ms(),
            timeout_ms: default_timeout_ms(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: None,
        }
    }
}

impl fmt::Debug for InferenceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InferenceConfig")
            .field("request_url", &self.request_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish_non_exhaustive()
    }
}

impl InferenceConfig {
    /// Models listing endpoint, derived from the chat-completions URL
    #[must_use]
    pub fn models_url(&self) -> String {
        let base = self.request_url.trim_end_matches('/');
        let base = base.strip_suffix("/chat/completions").unwrap_or(base);
        format!("{base}/models")
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid field.
    pub fn validate(&self) -> Result<(), String> {
        if self.request_url.trim().is_empty() {
            return Err("request_url must not be empty".to_string());
        }
        if self.default_model.trim().is_empty() {
            return Err("default_model must not be empty".to_string());
        }
        if self.connect_timeout_ms == 0 || self.timeout_ms == 0 {
            return Err("timeouts must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_sensible_values() {
        let config = InferenceConfig::default();
        assert_eq!(
            config.request_url,
            "https://api.deepseek.com/v1/chat/completions"
        );
        assert_eq!(config.default_model, "deepseek-chat");
        assert_eq!(config.connect_timeout_ms, 30_000);
        assert_eq!(config.timeout_ms, 180_000);
        assert_eq!(config.max_tokens, 1500);
        assert!((config.temperature - 0.5).abs() < 0.01);
        assert!(config.api_key.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn models_url_strips_chat_path() {
        let config = InferenceConfig::default();
        assert_eq!(config.models_url(), "https://api.deepseek.com/v1/models");
    }

    #[test]
    fn models_url_for_plain_base() {
        let config = InferenceConfig {
            request_url: "http://localhost:8080/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.models_url(), "http://localhost:8080/models");
    }

    #[test]
    fn config_deserialization_with_defaults() {
        let config: InferenceConfig = serde_json::from_str(r#"{"api_key":"sk-test"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.timeout_ms, 180_000);
    }

    #[test]
    fn api_key_is_never_serialized() {
        let config = InferenceConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("sk-secret"));
        assert!(json.contains("request_url"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = InferenceConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn validate_rejects_bad_temperature() {
        let config = InferenceConfig {
            temperature: 3.5,
            ..Default::default()
        };
        assert!(config.validate().unwrap_err().contains("temperature"));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = InferenceConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
