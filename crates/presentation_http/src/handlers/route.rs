//! Route planning handler

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;
use utoipa::IntoParams;

use crate::{error::ApiError, response::ApiResponse, state::AppState};

/// Query parameters for `GET /api/route/getRoute`
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RouteParams {
    /// Start point as `"lat,lng"`
    #[param(example = "28.9783,118.875")]
    pub origin: Option<String>,
    /// End point as `"lat,lng"`
    #[param(example = "28.5964,118.6798")]
    pub destination: Option<String>,
    /// `driving` (default), `walking` or `transit`
    pub route_type: Option<String>,
}

/// Plan a route and return its geometry as `"lng,lat"` strings
#[utoipa::path(
    get,
    path = "/api/route/getRoute",
    tag = "route",
    params(RouteParams),
    responses(
        (status = 200, description = "Decoded route geometry", body = ApiResponse<Vec<String>>),
        (status = 400, description = "Invalid coordinates or route type", body = crate::response::ErrorResponse),
        (status = 404, description = "No route found", body = crate::response::ErrorResponse),
        (status = 429, description = "Rate limited", body = crate::response::ErrorResponse),
        (status = 502, description = "Routing provider failure", body = crate::response::ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_route(
    State(state): State<AppState>,
    Query(params): Query<RouteParams>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let origin = params
        .origin
        .as_deref()
        .ok_or_else(|| ApiError::missing_parameter("origin"))?;
    let destination = params
        .destination
        .as_deref()
        .ok_or_else(|| ApiError::missing_parameter("destination"))?;

    let route = state
        .route_service
        .plan_route(origin, destination, params.route_type.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(route.to_lng_lat_strings())))
}
