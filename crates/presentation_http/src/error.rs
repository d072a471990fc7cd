//! API error handling
//!
//! Maps application failures onto HTTP statuses and the error envelope.
//! Configuration and internal failures are logged and returned without
//! their details.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::DomainError;
use thiserror::Error;
use tracing::{error, warn};

use crate::response::ErrorResponse;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// The caller sent something unusable
    #[error("Bad request: {message}")]
    BadRequest { code: &'static str, message: String },

    /// The provider found no route between the two points
    #[error("Not found: {0}")]
    NotFound(String),

    /// An upstream provider failed or answered with something unusable
    #[error("Bad gateway: {message}")]
    BadGateway { code: &'static str, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Create a bad request error for a missing query parameter
    pub fn missing_parameter(name: &str) -> Self {
        Self::BadRequest {
            code: "missing_parameter",
            message: format!("Missing required parameter '{name}'"),
        }
    }

    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest { code, .. } | Self::BadGateway { code, .. } => *code,
            Self::NotFound(_) => "empty_route",
            Self::RateLimited => "rate_limited",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = match self {
            Self::BadRequest { message, .. } | Self::NotFound(message) => message,
            Self::BadGateway { message, .. } => {
                warn!(error = code, %message, "Upstream failure");
                message
            },
            Self::RateLimited => "Rate limit exceeded".to_string(),
            Self::Internal(msg) => {
                error!(error = %msg, "Internal error");
                "An internal error occurred".to_string()
            },
        };

        let body = ErrorResponse::new(status.as_u16(), message, code);

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        match err {
            ApplicationError::Domain(DomainError::EmptyRoute) => {
                Self::NotFound("no route found".to_string())
            },
            ApplicationError::Domain(e) if e.is_client_error() => Self::BadRequest {
                code: e.code(),
                message: e.to_string(),
            },
            ApplicationError::Domain(e) => Self::BadGateway {
                code: e.code(),
                message: e.to_string(),
            },
            ApplicationError::ExternalService(msg) => Self::BadGateway {
                code: "external_service_error",
                message: msg,
            },
            ApplicationError::Inference(msg) => Self::BadGateway {
                code: "inference_error",
                message: msg,
            },
            ApplicationError::RateLimited => Self::RateLimited,
            ApplicationError::Configuration(msg) | ApplicationError::Internal(msg) => {
                Self::Internal(msg)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn client_domain_errors_are_bad_requests() {
        let err: ApiError = ApplicationError::Domain(DomainError::OutOfRegion {
            input: "30.5,118.87".to_string(),
        })
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "out_of_region");

        let err: ApiError =
            ApplicationError::Domain(DomainError::UnsupportedRouteMode("flying".to_string()))
                .into();
        assert_eq!(err.code(), "unsupported_route_mode");

        let err: ApiError = ApplicationError::Domain(DomainError::EmptyQuestion).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_route_is_not_found() {
        let err: ApiError = ApplicationError::Domain(DomainError::EmptyRoute).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "empty_route");
    }

    #[test]
    fn upstream_payload_errors_are_bad_gateway() {
        let cases = [
            DomainError::UpstreamStatusFailure {
                status: "0".to_string(),
                info: "INVALID_USER_KEY".to_string(),
                infocode: "10001".to_string(),
            },
            DomainError::MalformedPolyline {
                position: 3,
                reason: "truncated".to_string(),
            },
            DomainError::UnsanitizableModelOutput("no braces".to_string()),
            DomainError::missing_field("tripName"),
            DomainError::invalid_type("days", "integer >= 1"),
            DomainError::InvalidCoordinateValue {
                path: "routeList[0].longitude".to_string(),
                value: "\"east\"".to_string(),
            },
        ];

        for case in cases {
            let expected = case.code();
            let err: ApiError = ApplicationError::Domain(case).into();
            assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
            assert_eq!(err.code(), expected);
        }
    }

    #[test]
    fn service_errors_map_by_kind() {
        let err: ApiError = ApplicationError::ExternalService("AMap down".to_string()).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);

        let err: ApiError = ApplicationError::Inference("Status 500".to_string()).into();
        assert_eq!(err.code(), "inference_error");

        let err: ApiError = ApplicationError::RateLimited.into();
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);

        let err: ApiError = ApplicationError::Configuration("missing key".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn envelope_mirrors_status() {
        let (status, json) = body_json(ApiError::missing_parameter("origin")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], 400);
        assert_eq!(json["error"], "missing_parameter");
        assert!(json["msg"].as_str().unwrap().contains("origin"));
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, json) =
            body_json(ApiError::Internal("api_key=sk-secret rejected".to_string())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["msg"], "An internal error occurred");
        assert!(!json.to_string().contains("sk-secret"));
    }
}
