//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{response::ApiResponse, state::AppState};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Liveness check - is the server running?
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Server is running", body = ApiResponse<HealthResponse>))
)]
pub async fn health_check() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Readiness response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub inference: ServiceStatus,
}

/// Status of a backend service
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceStatus {
    pub healthy: bool,
    pub model: String,
}

/// Readiness check - can the language model backend be reached?
///
/// The routing provider has no cheap health endpoint and is not checked.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready", body = ApiResponse<ReadinessResponse>),
        (status = 503, description = "Inference backend unreachable", body = ApiResponse<ReadinessResponse>)
    )
)]
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<ReadinessResponse>>) {
    let healthy = state.trip_service.is_healthy().await;
    let readiness = ReadinessResponse {
        ready: healthy,
        inference: ServiceStatus {
            healthy,
            model: state.trip_service.current_model(),
        },
    };

    if healthy {
        (StatusCode::OK, Json(ApiResponse::success(readiness)))
    } else {
        let status = StatusCode::SERVICE_UNAVAILABLE;
        (
            status,
            Json(ApiResponse::with_code(
                status.as_u16(),
                "inference backend unavailable",
                readiness,
            )),
        )
    }
}
