//! AMap route adapter - Implements RoutePlannerPort using integration_amap

use application::{error::ApplicationError, ports::RoutePlannerPort};
use async_trait::async_trait;
use domain::RouteQuery;
use integration_amap::{AmapClient, AmapConfig, AmapError, HttpAmapClient};
use serde_json::Value;
use tracing::{debug, instrument};

/// Adapter for the AMap direction API
#[derive(Debug)]
pub struct AmapRouteAdapter {
    client: HttpAmapClient,
}

impl AmapRouteAdapter {
    /// Create a new adapter with the given configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the AMap settings are invalid.
    pub fn new(config: &AmapConfig) -> Result<Self, ApplicationError> {
        let client = HttpAmapClient::new(config).map_err(Self::map_error)?;
        Ok(Self { client })
    }

    /// Convert integration error to application error
    fn map_error(e: AmapError) -> ApplicationError {
        match e {
            AmapError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
            AmapError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
            AmapError::Timeout { timeout_ms } => {
                ApplicationError::ExternalService(format!("AMap timeout after {timeout_ms}ms"))
            },
            other => ApplicationError::ExternalService(format!("AMap request failed: {other}")),
        }
    }
}

#[async_trait]
impl RoutePlannerPort for AmapRouteAdapter {
    #[instrument(skip(self), fields(mode = %query.mode))]
    async fn fetch_route(&self, query: &RouteQuery) -> Result<Value, ApplicationError> {
        let response = self
            .client
            .fetch_route(query)
            .await
            .map_err(Self::map_error)?;

        debug!(
            status = ?response.get("status"),
            "Route response received"
        );

        Ok(response)
    }
}
