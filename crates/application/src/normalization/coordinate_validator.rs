//! User coordinate validation
//!
//! End users supply points north-first (`"lat,lng"`); the routing provider
//! and the polyline codec work east-first. [`validate_lat_lng`] is the one
//! place where that swap happens.

use domain::{BoundingRegion, DomainError, GeoPoint};

/// Parse a `"lat,lng"` string and check it against the operating region
///
/// Each field may carry surrounding whitespace. Exponent notation is
/// accepted, non-finite values (`NaN`, `inf`) are not.
///
/// # Errors
///
/// - [`DomainError::InvalidCoordinateFormat`] when the input is not exactly
///   two comma-separated decimal numbers
/// - [`DomainError::OutOfRegion`] when the point lies outside `region`
pub fn validate_lat_lng(input: &str, region: &BoundingRegion) -> Result<GeoPoint, DomainError> {
    let fields: Vec<&str> = input.split(',').collect();
    let [lat_text, lng_text] = fields.as_slice() else {
        let reason = if fields.len() < 2 {
            "expected 'lat,lng' separated by a comma".to_string()
        } else {
            format!("expected exactly two fields, found {}", fields.len())
        };
        return Err(DomainError::invalid_format(input, reason));
    };

    let latitude = parse_axis(input, lat_text, "latitude")?;
    let longitude = parse_axis(input, lng_text, "longitude")?;

    let point = GeoPoint::from_lng_lat(longitude, latitude).map_err(|_| {
        DomainError::OutOfRegion {
            input: input.to_string(),
        }
    })?;

    if !region.contains(&point) {
        return Err(DomainError::OutOfRegion {
            input: input.to_string(),
        });
    }

    Ok(point)
}

fn parse_axis(input: &str, field: &str, axis: &str) -> Result<f64, DomainError> {
    let value: f64 = field
        .trim()
        .parse()
        .map_err(|_| DomainError::invalid_format(input, format!("{axis} is not a number")))?;

    if !value.is_finite() {
        return Err(DomainError::invalid_format(
            input,
            format!("{axis} must be finite"),
        ));
    }

    Ok(value)
}
