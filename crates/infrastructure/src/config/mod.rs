//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `integrations`: AMap routing and DeepSeek inference
//!
//! Telemetry settings live next to their initializer in `crate::telemetry`.

mod integrations;
mod server;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use integrations::{AmapAppConfig, InferenceAppConfig};
pub use server::{LogFormat, ServerConfig};

use crate::telemetry::TelemetryConfig;

/// Environment variable naming the configuration file (without extension)
pub const CONFIG_PATH_ENV: &str = "TOURISM_CONFIG";

/// Environment variable prefix for overrides, e.g. `TOURISM__AMAP__API_KEY`
pub const ENV_PREFIX: &str = "TOURISM";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// AMap routing configuration
    #[serde(default)]
    pub amap: AmapAppConfig,

    /// Inference configuration
    #[serde(default)]
    pub inference: InferenceAppConfig,

    /// Telemetry configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the file named by `TOURISM_CONFIG` (default
    /// `config`) and environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(&path)
    }

    /// Load configuration from a specific file and environment overrides
    ///
    /// The file is optional; any format the `config` crate recognises by
    /// extension is accepted.
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        debug!(path, "Loading configuration");

        let builder = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate every section, returning the first problem found
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending `section.field`.
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.amap.validate()?;
        self.inference.validate()?;
        self.telemetry.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn default_config_needs_keys() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8080);
        assert!(config.validate().unwrap_err().contains("api_key"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from("/nonexistent/tourism-config").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.amap.city, "衢州市");
        assert_eq!(config.inference.default_model, "deepseek-chat");
    }

    #[test]
    fn loads_sections_from_toml() {
        let file = write_config(
            r#"
[server]
port = 9090
log_format = "json"
allowed_origins = ["http://localhost:5173"]

[amap]
api_key = "amap-key"
cache_ttl_secs = 0

[inference]
api_key = "sk-key"
temperature = 0.3

[telemetry]
log_filter = "debug"
"#,
        );

        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.server.allowed_origins, vec!["http://localhost:5173"]);
        assert_eq!(
            config.amap.api_key.as_ref().unwrap().expose_secret(),
            "amap-key"
        );
        assert_eq!(config.amap.cache_ttl_secs, 0);
        assert_eq!(config.amap.timeout_ms, 10_000);
        assert!((config.inference.temperature - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.telemetry.log_filter, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_names_the_section() {
        let file = write_config(
            r#"
[amap]
api_key = "amap-key"
driving_url = "not a url"

[inference]
api_key = "sk-key"
"#,
        );

        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("amap.driving_url"), "{err}");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let file = write_config("[server\nport = ");
        assert!(AppConfig::load_from(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn serialization_omits_secrets() {
        let file = write_config(
            r#"
[amap]
api_key = "amap-key"
"#,
        );
        let config = AppConfig::load_from(file.path().to_str().unwrap()).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("amap-key"));
        assert!(!format!("{config:?}").contains("amap-key"));
    }
}
