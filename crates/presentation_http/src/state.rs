//! Application state shared across handlers

use std::sync::Arc;

use application::{RouteService, TripService};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Route planning and polyline decoding
    pub route_service: Arc<RouteService>,
    /// Itinerary generation
    pub trip_service: Arc<TripService>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}
