//! AMap direction client
//!
//! Issues GET requests against the driving, walking and integrated transit
//! endpoints and hands back the decoded JSON body untouched.

use std::time::Duration;

use async_trait::async_trait;
use domain::RouteQuery;
use moka::future::Cache;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::config::AmapConfig;
use crate::error::AmapError;
use crate::models::DirectionParams;

const MAX_CACHED_ROUTES: u64 = 1_000;

/// Trait for route providers returning raw AMap responses
#[async_trait]
pub trait AmapClient: Send + Sync {
    /// Fetch the raw direction response for a query
    async fn fetch_route(&self, query: &RouteQuery) -> Result<Value, AmapError>;
}

/// HTTP client for the AMap Web Service direction API
#[derive(Debug)]
pub struct HttpAmapClient {
    client: Client,
    config: AmapConfig,
    cache: Option<Cache<String, Value>>,
}

impl HttpAmapClient {
    /// Create a new AMap client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &AmapConfig) -> Result<Self, AmapError> {
        config.validate().map_err(AmapError::ConfigurationError)?;

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent("QuzhouTourism/1.0")
            .build()
            .map_err(|e| AmapError::ConnectionFailed(e.to_string()))?;

        let cache = config.caching_enabled().then(|| {
            Cache::builder()
                .max_capacity(MAX_CACHED_ROUTES)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build()
        });

        Ok(Self {
            client,
            config: config.clone(),
            cache,
        })
    }

    /// Get the client configuration
    #[must_use]
    pub const fn config(&self) -> &AmapConfig {
        &self.config
    }

    fn cache_key(query: &RouteQuery) -> String {
        format!("{}|{}|{}", query.mode, query.origin, query.destination)
    }

    /// Parse a response body into JSON
    fn parse_body(body: &str) -> Result<Value, AmapError> {
        serde_json::from_str(body).map_err(|e| AmapError::ParseError(e.to_string()))
    }

    /// Only responses AMap marks as successful are worth keeping
    fn is_cacheable(response: &Value) -> bool {
        match response.get("status") {
            Some(Value::String(s)) => s == "1",
            Some(Value::Number(n)) => n.as_u64() == Some(1),
            _ => false,
        }
    }
}

#[async_trait]
impl AmapClient for HttpAmapClient {
    #[instrument(skip(self), fields(mode = %query.mode))]
    async fn fetch_route(&self, query: &RouteQuery) -> Result<Value, AmapError> {
        let key = Self::cache_key(query);
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get(&key).await {
                debug!("Route cache hit");
                return Ok(cached);
            }
        }

        let url = self.config.url_for(query.mode);
        let params = DirectionParams::new(query, &self.config);

        debug!(%url, origin = %params.origin, destination = %params.destination, "Requesting route");

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AmapError::Timeout {
                        timeout_ms: self.config.timeout_ms,
                    }
                } else {
                    AmapError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AmapError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(AmapError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AmapError::ParseError(e.without_url().to_string()))?;

        let result = Self::parse_body(&body)?;

        if let Some(cache) = &self.cache {
            if Self::is_cacheable(&result) {
                cache.insert(key, result.clone()).await;
            }
        }

        debug!(bytes = body.len(), "Route response received");
        Ok(result)
    }
}
