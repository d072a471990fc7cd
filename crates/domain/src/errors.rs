//! Domain-level errors

use thiserror::Error;

/// Errors raised while validating input or normalizing upstream payloads
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A coordinate string is not two comma-separated decimal numbers
    #[error("Invalid coordinate format '{input}': {reason}")]
    InvalidCoordinateFormat { input: String, reason: String },

    /// A well-formed coordinate lies outside the operating region
    #[error("Coordinate '{input}' is outside the supported region")]
    OutOfRegion { input: String },

    /// The requested travel mode is not one of driving, walking, transit
    #[error("Unsupported route mode: {0}")]
    UnsupportedRouteMode(String),

    /// The routing provider answered with a non-success status
    #[error("Routing provider returned status '{status}' ({info}, infocode {infocode})")]
    UpstreamStatusFailure {
        status: String,
        info: String,
        infocode: String,
    },

    /// An encoded polyline could not be decoded
    #[error("Malformed polyline at byte {position}: {reason}")]
    MalformedPolyline { position: usize, reason: String },

    /// The provider answered successfully but no geometry was found
    #[error("No route geometry available")]
    EmptyRoute,

    /// Model output could not be turned into a JSON object
    #[error("Model output is not usable JSON: {0}")]
    UnsanitizableModelOutput(String),

    /// A structurally required itinerary field is absent or null
    #[error("Missing required field: {path}")]
    MissingRequiredField { path: String },

    /// An itinerary field is present but has the wrong JSON type
    #[error("Field '{path}' has an invalid type, expected {expected}")]
    InvalidFieldType { path: String, expected: &'static str },

    /// A route stop carries a longitude or latitude that is not a number
    #[error("Invalid coordinate value at '{path}': {value}")]
    InvalidCoordinateValue { path: String, value: String },

    /// The itinerary question was empty
    #[error("Question must not be empty")]
    EmptyQuestion,
}

impl DomainError {
    /// Stable snake_case identifier for the error kind
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCoordinateFormat { .. } => "invalid_coordinate_format",
            Self::OutOfRegion { .. } => "out_of_region",
            Self::UnsupportedRouteMode(_) => "unsupported_route_mode",
            Self::UpstreamStatusFailure { .. } => "upstream_status_failure",
            Self::MalformedPolyline { .. } => "malformed_polyline",
            Self::EmptyRoute => "empty_route",
            Self::UnsanitizableModelOutput(_) => "unsanitizable_model_output",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::InvalidFieldType { .. } => "invalid_field_type",
            Self::InvalidCoordinateValue { .. } => "invalid_coordinate_value",
            Self::EmptyQuestion => "empty_question",
        }
    }

    /// Whether the error was caused by the caller's own input
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidCoordinateFormat { .. }
                | Self::OutOfRegion { .. }
                | Self::UnsupportedRouteMode(_)
                | Self::EmptyQuestion
        )
    }

    /// Create an invalid coordinate format error
    pub fn invalid_format(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinateFormat {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::MissingRequiredField { path: path.into() }
    }

    /// Create an invalid field type error
    pub fn invalid_type(path: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidFieldType {
            path: path.into(),
            expected,
        }
    }
}
