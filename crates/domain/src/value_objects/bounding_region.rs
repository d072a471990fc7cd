//! Rectangular operating region

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// An axis-aligned latitude/longitude box with inclusive edges
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    min_latitude: f64,
    max_latitude: f64,
    min_longitude: f64,
    max_longitude: f64,
}

impl BoundingRegion {
    /// Quzhou municipality, the only region the service accepts user
    /// coordinates for
    pub const QUZHOU: Self = Self::new(28.4, 29.5, 118.4, 119.5);

    /// Create a region from its latitude and longitude bounds
    #[must_use]
    pub const fn new(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
        }
    }

    /// Check whether the point lies inside the region, edges included
    #[must_use]
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude())
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude())
    }

    #[must_use]
    pub const fn min_latitude(&self) -> f64 {
        self.min_latitude
    }

    #[must_use]
    pub const fn max_latitude(&self) -> f64 {
        self.max_latitude
    }

    #[must_use]
    pub const fn min_longitude(&self) -> f64 {
        self.min_longitude
    }

    #[must_use]
    pub const fn max_longitude(&self) -> f64 {
        self.max_longitude
    }
}

impl Default for BoundingRegion {
    fn default() -> Self {
        Self::QUZHOU
    }
}
