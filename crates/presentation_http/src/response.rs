//! Response envelope shared by every endpoint
//!
//! The tourism frontend reads `code` (200 on success), `msg` and `data`
//! from each body. Errors add a stable machine-readable `error` code.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Message sent with every successful response
pub const SUCCESS_MSG: &str = "操作成功";

/// Successful response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// HTTP status mirrored into the body
    pub code: u16,
    /// Human-readable status message
    pub msg: String,
    /// Response payload
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` in a 200 envelope
    pub fn success(data: T) -> Self {
        Self {
            code: 200,
            msg: SUCCESS_MSG.to_string(),
            data: Some(data),
        }
    }

    /// Envelope with a non-200 code that still carries a payload
    pub fn with_code(code: u16, msg: impl Into<String>, data: T) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: Some(data),
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "code": 400,
    "msg": "Coordinate '30.5,118.87' is outside the supported region",
    "data": null,
    "error": "out_of_region"
}))]
pub struct ErrorResponse {
    /// HTTP status mirrored into the body
    pub code: u16,
    /// Human-readable error message
    pub msg: String,
    /// Always null
    pub data: Option<serde_json::Value>,
    /// Stable snake_case error code
    pub error: String,
}

impl ErrorResponse {
    /// Build an error envelope
    pub fn new(code: u16, msg: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
            error: error.into(),
        }
    }
}
