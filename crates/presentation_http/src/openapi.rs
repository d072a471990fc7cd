//! OpenAPI documentation
//!
//! Served as JSON at `/api-docs/openapi.json`.

// utoipa derive output trips this lint
#![allow(clippy::needless_for_each)]

use axum::Json;
use utoipa::OpenApi;

use crate::handlers;

/// OpenAPI documentation for the tourism API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Quzhou Tourism API",
        description = "Route planning and AI itinerary generation for the Quzhou tourism site",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "health", description = "Liveness and readiness"),
        (name = "route", description = "Route planning between two points"),
        (name = "trip", description = "AI itinerary generation")
    ),
    paths(
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::route::get_route,
        handlers::trip::generate_trip,
    ),
    components(
        schemas(
            handlers::health::HealthResponse,
            handlers::health::ReadinessResponse,
            handlers::health::ServiceStatus,
            handlers::trip::GenerateTripRequest,
            handlers::trip::TripResponse,
            handlers::trip::DailyScheduleDto,
            handlers::trip::ScheduleItemDto,
            handlers::trip::RouteStopDto,
            crate::response::ErrorResponse,
        )
    )
)]
#[derive(Debug)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
