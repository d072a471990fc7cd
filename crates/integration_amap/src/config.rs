//! AMap service configuration

use domain::RouteMode;
use serde::{Deserialize, Serialize};
use url::Url;

/// Driving direction endpoint
pub const DEFAULT_DRIVING_URL: &str = "https://restapi.amap.com/v3/direction/driving";
/// Walking direction endpoint
pub const DEFAULT_WALKING_URL: &str = "https://restapi.amap.com/v3/direction/walking";
/// Integrated transit direction endpoint
pub const DEFAULT_TRANSIT_URL: &str = "https://restapi.amap.com/v3/direction/transit/integrated";
/// City transit queries are scoped to
pub const DEFAULT_CITY: &str = "衢州市";
/// Transit type requested from the integrated endpoint
pub const DEFAULT_TRANSIT_TYPE: &str = "bus";

/// Configuration for the AMap direction client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmapConfig {
    /// Web service API key
    #[serde(default)]
    pub api_key: String,

    /// Driving direction endpoint
    #[serde(default = "default_driving_url")]
    pub driving_url: String,

    /// Walking direction endpoint
    #[serde(default = "default_walking_url")]
    pub walking_url: String,

    /// Transit direction endpoint
    #[serde(default = "default_transit_url")]
    pub transit_url: String,

    /// City passed with transit queries
    #[serde(default = "default_city")]
    pub city: String,

    /// Transit type passed with transit queries
    #[serde(default = "default_transit_type")]
    pub transit_type: String,

    /// Connection timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Total request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Cache TTL for successful responses in seconds (0 to disable caching)
    #[serde(default = "default_cache_ttl_secs")]
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

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_cache_ttl_secs() -> u64 {
    300
}

impl Default for AmapConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            driving_url: default_driving_url(),
            walking_url: default_walking_url(),
            transit_url: default_transit_url(),
            city: default_city(),
            transit_type: default_transit_type(),
            connect_timeout_ms: default_connect_timeout_ms(),
            timeout_ms: default_timeout_ms(),
            cache_ttl_secs: default_cache_ttl_secs(),
        }
    }
}

impl AmapConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            api_key: "test-key".to_string(),
            connect_timeout_ms: 1_000,
            timeout_ms: 2_000,
            cache_ttl_secs: 0,
            ..Default::default()
        }
    }

    /// Point every endpoint at `base_url`, keeping the usual paths
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        self.driving_url = format!("{base}/v3/direction/driving");
        self.walking_url = format!("{base}/v3/direction/walking");
        self.transit_url = format!("{base}/v3/direction/transit/integrated");
        self
    }

    /// Endpoint for a travel mode
    #[must_use]
    pub fn url_for(&self, mode: RouteMode) -> &str {
        match mode {
            RouteMode::Driving => &self.driving_url,
            RouteMode::Walking => &self.walking_url,
            RouteMode::Transit => &self.transit_url,
        }
    }

    /// Check if caching is enabled
    #[must_use]
    pub const fn caching_enabled(&self) -> bool {
        self.cache_ttl_secs > 0
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.api_key.trim().is_empty() {
            return Err("api_key must not be empty".to_string());
        }

        for mode in RouteMode::ALL {
            let url = self.url_for(mode);
            if url.trim().is_empty() {
                return Err(format!("{mode}_url must not be empty"));
            }
            Url::parse(url).map_err(|e| format!("{mode}_url is not a valid URL: {e}"))?;
        }

        if self.connect_timeout_ms == 0 {
            return Err("connect_timeout_ms must be greater than 0".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("timeout_ms must be greater than 0".to_string());
        }

        Ok(())
    }
}
