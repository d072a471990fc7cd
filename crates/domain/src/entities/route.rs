//! Route request and decoded route geometry

use serde::{Deserialize, Serialize};

use crate::value_objects::{GeoPoint, RouteMode};

/// A validated request for a route between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteQuery {
    pub origin: GeoPoint,
    pub destination: GeoPoint,
    pub mode: RouteMode,
}

impl RouteQuery {
    #[must_use]
    pub const fn new(origin: GeoPoint, destination: GeoPoint, mode: RouteMode) -> Self {
        Self {
            origin,
            destination,
            mode,
        }
    }
}

/// Decoded route geometry in travel order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    mode: RouteMode,
    points: Vec<GeoPoint>,
}

impl Route {
    #[must_use]
    pub const fn new(mode: RouteMode, points: Vec<GeoPoint>) -> Self {
        Self { mode, points }
    }

    #[must_use]
    pub const fn mode(&self) -> RouteMode {
        self.mode
    }

    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Render every point as a `"lng,lat"` string, preserving order
    #[must_use]
    pub fn to_lng_lat_strings(&self) -> Vec<String> {
        self.points.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_points_in_order() {
        let route = Route::new(
            RouteMode::Walking,
            vec![
                GeoPoint::new_unchecked(118.87, 28.94),
                GeoPoint::new_unchecked(118.875, 28.945),
            ],
        );
        assert_eq!(
            route.to_lng_lat_strings(),
            vec!["118.87,28.94".to_string(), "118.875,28.945".to_string()]
        );
        assert_eq!(route.len(), 2);
        assert_eq!(route.mode(), RouteMode::Walking);
    }

    #[test]
    fn empty_route() {
        let route = Route::new(RouteMode::Driving, Vec::new());
        assert!(route.is_empty());
        assert!(route.to_lng_lat_strings().is_empty());
    }
}
