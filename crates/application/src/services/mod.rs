//! Application services - Use case implementations

mod route_service;
mod trip_service;

pub use route_service::RouteService;
pub use trip_service::{DEFAULT_SYSTEM_PROMPT, TripService};
