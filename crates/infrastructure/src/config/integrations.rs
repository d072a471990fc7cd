//! Integration configurations: AMap routing and DeepSeek inference.

use ai_core::InferenceConfig;
use integration_amap::{
    AmapConfig, DEFAULT_CITY, DEFAULT_DRIVING_URL, DEFAULT_TRANSIT_TYPE, DEFAULT_TRANSIT_URL,
    DEFAULT_WALKING_URL,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

// ==============================
// AMap Configuration
// ==============================

/// AMap direction API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AmapAppConfig {
    /// Web service key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Driving direction endpoint
    #[serde(default = "default_driving_url")]
    pub driving_url: String,

    /// Walking direction endpoint
    #[serde(default = "default_walking_url")]
    pub walking_url: String,

    /// Integrated transit endpoint
    #[serde(default = "default_transit_url")]
    pub transit_url: String,

    /// City passed with transit queries (default: 衢州市)
    #[serde(default = "default_city")]
    pub city: String,

    /// Transit type passed with transit queries (default: bus)
    #[serde(default = "default_transit_type")]
    pub transit_type: String,

    /// Connection timeout in milliseconds (default: 5000)
    #[serde(default = "default_amap_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds (default: 10000)
    #[serde(default = "default_amap_timeout")]
    pub timeout_ms: u64,

    /// Cache TTL in seconds, 0 disables (default: 300)
    #[serde(default = "default_amap_cache_ttl")]
    pub cache_ttl_secs: u64,
}

fn default_driving_url() -> String {
    DEFAULT_DRIVING_URL.to_string()
}

fn default_walking_url() -> String {
    DEFAULT_WALKING_URL.to_string()
}

fn default_transit_url() -> String {
    DEFAULT_TRANSIT_URL.to_string()
}

fn default_city() -> String {
    DEFAULT_CITY.to_string()
}

fn default_transit_type() -> String {
    DEFAULT_TRANSIT_TYPE.to_string()
}

const fn default_amap_connect_timeout() -> u64 {
    5_000
}

const fn default_amap_timeout() -> u64 {
    10_000
}

const fn default_amap_cache_ttl() -> u64 {
    300
}

impl Default for AmapAppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            driving_url: default_driving_url(),
            walking_url: default_walking_url(),
            transit_url: default_transit_url(),
            city: default_city(),
            transit_type: default_transit_type(),
            connect_timeout_ms: default_amap_connect_timeout(),
            timeout_ms: default_amap_timeout(),
            cache_ttl_secs: default_amap_cache_ttl(),
        }
    }
}

impl std::fmt::Debug for AmapAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AmapAppConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("driving_url", &self.driving_url)
            .field("walking_url", &self.walking_url)
            .field("transit_url", &self.transit_url)
            .field("city", &self.city)
            .field("transit_type", &self.transit_type)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("timeout_ms", &self.timeout_ms)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .finish()
    }
}

impl AmapAppConfig {
    /// Convert to `integration_amap::AmapConfig`
    #[must_use]
    pub fn to_amap_config(&self) -> AmapConfig {
        AmapConfig {
            api_key: self
                .api_key
                .as_ref()
                .map(|k| k.expose_secret().to_string())
                .unwrap_or_default(),
            driving_url: self.driving_url.clone(),
            walking_url: self.walking_url.clone(),
            transit_url: self.transit_url.clone(),
            city: self.city.clone(),
            transit_type: self.transit_type.clone(),
            connect_timeout_ms: self.connect_timeout_ms,
            timeout_ms: self.timeout_ms,
            cache_ttl_secs: self.cache_ttl_secs,
        }
    }

    /// Validate the AMap section
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or an endpoint is malformed.
    pub fn validate(&self) -> Result<(), String> {
        self.to_amap_config()
            .validate()
            .map_err(|e| format!("amap.{e}"))
    }
}

// ==============================
// Inference Configuration
// ==============================

/// DeepSeek chat-completions configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct InferenceAppConfig {
    /// Chat-completions endpoint
    #[serde(default = "default_request_url")]
    pub request_url: String,

    /// API key (sensitive - uses `SecretString`)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Model name (default: deepseek-chat)
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Connection timeout in milliseconds (default: 30000)
    #[serde(default = "default_inference_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Request timeout in milliseconds (default: 180000)
    #[serde(default = "default_inference_timeout")]
    pub timeout_ms: u64,

    /// Sampling temperature (default: 0.5)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum completion tokens (default: 1500)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Override for the itinerary system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
}

fn default_request_url() -> String {
    InferenceConfig::default().request_url
}

fn default_model() -> String {
    InferenceConfig::default().default_model
}

const fn default_inference_connect_timeout() -> u64 {
    30_000
}

const fn default_inference_timeout() -> u64 {
    180_000
}

const fn default_temperature() -> f32 {
    0.5
}

const fn default_max_tokens() -> u32 {
    1500
}

impl Default for InferenceAppConfig {
    fn default() -> Self {
        Self {
            request_url: default_request_url(),
            api_key: None,
            default_model: default_model(),
            connect_timeout_ms: default_inference_connect_timeout(),
            timeout_ms: default_inference_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            system_prompt: None,
        }
    }
}

impl std::fmt::Debug for InferenceAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceAppConfig")
            .field("request_url", &self.request_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("default_model", &self.default_model)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("timeout_ms", &self.timeout_ms)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("system_prompt", &self.system_prompt.is_some())
            .finish()
    }
}

impl InferenceAppConfig {
    /// Convert to `ai_core::InferenceConfig`
    #[must_use]
    pub fn to_inference_config(&self) -> InferenceConfig {
        InferenceConfig {
            request_url: self.request_url.clone(),
            api_key: self.api_key.as_ref().map(|k| k.expose_secret().to_string()),
            default_model: self.default_model.clone(),
            connect_timeout_ms: self.connect_timeout_ms,
            timeout_ms: self.timeout_ms,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system_prompt: self.system_prompt.clone(),
        }
    }

    /// Validate the inference section
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or a field is out of range.
    pub fn validate(&self) -> Result<(), String> {
        let has_key = self
            .api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty());
        if !has_key {
            return Err("inference.api_key must not be empty".to_string());
        }
        self.to_inference_config()
            .validate()
            .map_err(|e| format!("inference.{e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amap_defaults_match_client_defaults() {
        let app = AmapAppConfig::default();
        let client = app.to_amap_config();
        assert_eq!(client.driving_url, DEFAULT_DRIVING_URL);
        assert_eq!(client.city, "衢州市");
        assert_eq!(client.timeout_ms, 10_000);
        assert!(client.api_key.is_empty());
    }

    #[test]
    fn amap_requires_key() {
        let err = AmapAppConfig::default().validate().unwrap_err();
        assert!(err.starts_with("amap.api_key"));
    }

    #[test]
    fn amap_key_is_exposed_only_to_client_config() {
        let app = AmapAppConfig {
            api_key: Some(SecretString::from("amap-secret".to_string())),
            ..Default::default()
        };
        assert!(app.validate().is_ok());
        assert_eq!(app.to_amap_config().api_key, "amap-secret");
        assert!(!format!("{app:?}").contains("amap-secret"));
        assert!(!serde_json::to_string(&app).unwrap().contains("amap-secret"));
    }

    #[test]
    fn inference_requires_key() {
        let err = InferenceAppConfig::default().validate().unwrap_err();
        assert!(err.contains("api_key"));
    }

    #[test]
    fn inference_converts_to_engine_config() {
        let app = InferenceAppConfig {
            api_key: Some(SecretString::from("sk-secret".to_string())),
            temperature: 0.2,
            ..Default::default()
        };
        let config = app.to_inference_config();
        assert_eq!(config.api_key.as_deref(), Some("sk-secret"));
        assert_eq!(config.default_model, "deepseek-chat");
        assert!((config.temperature - 0.2).abs() < f32::EPSILON);
        assert!(app.validate().is_ok());
        assert!(!format!("{app:?}").contains("sk-secret"));
    }

    #[test]
    fn inference_rejects_out_of_range_temperature() {
        let app = InferenceAppConfig {
            api_key: Some(SecretString::from("sk".to_string())),
            temperature: 9.0,
            ..Default::default()
        };
        assert!(app.validate().unwrap_err().starts_with("inference.temperature"));
    }
}
