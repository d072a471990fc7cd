//! Quzhou tourism HTTP presentation layer
//!
//! Exposes route planning and itinerary generation behind the JSON
//! envelope the tourism frontend consumes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use middleware::{RequestIdLayer, ValidatedJson, ValidationError};
pub use response::{ApiResponse, ErrorResponse};
pub use routes::create_router;
pub use state::AppState;
