//! Route planner port
//!
//! Defines the interface for fetching raw route responses from the routing
//! provider. Adapters in the infrastructure layer implement this port; the
//! returned JSON is interpreted by the normalization core, not the adapter.

use async_trait::async_trait;
use domain::RouteQuery;
#[cfg(test)]
use mockall::automock;
use serde_json::Value;

use crate::error::ApplicationError;

/// Port for routing provider access
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutePlannerPort: Send + Sync {
    /// Fetch the provider's raw response for a route query
    ///
    /// The response is returned whatever its `status`; provider-level
    /// failures are detected by the caller.
    async fn fetch_route(&self, query: &RouteQuery) -> Result<Value, ApplicationError>;
}
