//! Geographic point value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS-style point stored in longitude/latitude order
///
/// Every upstream and downstream string representation in this system is
/// `"lng,lat"`, so the type keeps the same order to make axis mix-ups
/// visible at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    /// Longitude in degrees (-180 to 180)
    longitude: f64,
    /// Latitude in degrees (-90 to 90)
    latitude: f64,
}

/// Error type for invalid coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidCoordinates;

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid coordinates: longitude must be -180 to 180, latitude must be -90 to 90"
        )
    }
}

impl std::error::Error for InvalidCoordinates {}

/// Unchecked wire form; deserialization goes through `from_lng_lat`
#[derive(Deserialize)]
struct RawGeoPoint {
    longitude: f64,
    latitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = InvalidCoordinates;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::from_lng_lat(raw.longitude, raw.latitude)
    }
}

impl GeoPoint {
    /// Create a point from a longitude and a latitude
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` if either value is not finite, the
    /// longitude is not in [-180, 180] or the latitude is not in [-90, 90]
    pub fn from_lng_lat(longitude: f64, latitude: f64) -> Result<Self, InvalidCoordinates> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinates);
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Create a point without validation (for trusted constants)
    #[must_use]
    pub const fn new_unchecked(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Get the longitude
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Get the latitude
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }
}

/// Renders `"lng,lat"` using the shortest decimal form of each value
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.longitude, self.latitude)
    }
}
