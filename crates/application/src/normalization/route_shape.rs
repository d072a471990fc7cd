//! Route shape resolution for routing provider responses
//!
//! The provider nests its result under `route`, which is sometimes an object
//! and sometimes a list of objects. [`RouteShape`] names every shape we may
//! see so resolution is an exhaustive match instead of type probing.

use domain::{DomainError, RouteMode};
use serde_json::{Map, Value};
use tracing::warn;

use super::polyline::SEGMENT_SEPARATOR;

/// Status value the provider uses for a successful call
pub const SUCCESS_STATUS: &str = "1";

/// The shape of the `route` field in a provider response
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteShape<'a> {
    /// No `route` field, or an explicit `null`
    Missing,
    /// A single route object
    Object(&'a Map<String, Value>),
    /// A list of route objects, the first one is used
    List(&'a [Value]),
    /// Anything else (string, number, boolean)
    Other(&'a Value),
}

impl<'a> RouteShape<'a> {
    /// Classify the `route` field of a provider response
    pub fn of(response: &'a Value) -> Self {
        match response.get("route") {
            None | Some(Value::Null) => Self::Missing,
            Some(Value::Object(route)) => Self::Object(route),
            Some(Value::Array(routes)) => Self::List(routes),
            Some(other) => Self::Other(other),
        }
    }

    /// The route object polylines are read from, if any
    pub fn primary_route(self) -> Option<&'a Map<String, Value>> {
        match self {
            Self::Missing => None,
            Self::Object(route) => Some(route),
            Self::List(routes) => match routes.first() {
                Some(Value::Object(route)) => Some(route),
                Some(other) => {
                    warn!(kind = json_kind(other), "First route entry is not an object");
                    None
                },
                None => None,
            },
            Self::Other(value) => {
                warn!(kind = json_kind(value), "Unexpected route shape in provider response");
                None
            },
        }
    }
}

/// Check the provider status before any shape resolution
///
/// `status` may be a string or a number. Missing `info` or `infocode`
/// fields are reported as empty strings.
///
/// # Errors
///
/// Returns [`DomainError::UpstreamStatusFailure`] carrying the provider's
/// status, info and infocode when the status is not `"1"`.
pub fn check_upstream_status(response: &Value) -> Result<(), DomainError> {
    let status = scalar_text(response.get("status"));
    if status == SUCCESS_STATUS {
        return Ok(());
    }

    Err(DomainError::UpstreamStatusFailure {
        status,
        info: scalar_text(response.get("info")),
        infocode: scalar_text(response.get("infocode")),
    })
}

/// Extract a single polyline for the given mode, possibly empty
///
/// Driving and walking use the first entry of `paths`. Transit joins the
/// non-empty `polyline` of every entry in `steps` with `;`, in order.
/// Only call this after [`check_upstream_status`] succeeded.
pub fn extract_polyline(response: &Value, mode: RouteMode) -> String {
    let Some(route) = RouteShape::of(response).primary_route() else {
        return String::new();
    };

    match mode {
        RouteMode::Transit => join_step_polylines(route),
        RouteMode::Driving | RouteMode::Walking => first_path_polyline(route),
    }
}

fn join_step_polylines(route: &Map<String, Value>) -> String {
    let Some(Value::Array(steps)) = route.get("steps") else {
        return String::new();
    };

    let separator = SEGMENT_SEPARATOR.to_string();
    steps
        .iter()
        .filter_map(|step| step.get("polyline").and_then(Value::as_str))
        .filter(|polyline| !polyline.is_empty())
        .collect::<Vec<_>>()
        .join(&separator)
}

fn first_path_polyline(route: &Map<String, Value>) -> String {
    route
        .get("paths")
        .and_then(Value::as_array)
        .and_then(|paths| paths.first())
        .and_then(|path| path.get("polyline"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn scalar_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
