//! Query parameter models for the AMap direction endpoints

use domain::{RouteMode, RouteQuery};
use serde::Serialize;

use crate::config::AmapConfig;

/// Query string sent to every direction endpoint
///
/// Coordinates are rendered longitude first, as AMap expects.
#[derive(Debug, Serialize)]
pub(crate) struct DirectionParams<'a> {
    pub origin: String,
    pub destination: String,
    pub key: &'a str,
    pub output: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transit_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<&'static str>,
}

impl<'a> DirectionParams<'a> {
    pub(crate) fn new(query: &RouteQuery, config: &'a AmapConfig) -> Self {
        let transit = query.mode == RouteMode::Transit;
        Self {
            origin: query.origin.to_string(),
            destination: query.destination.to_string(),
            key: &config.api_key,
            output: "json",
            city: transit.then_some(config.city.as_str()),
            transit_type: transit.then_some(config.transit_type.as_str()),
            extensions: transit.then_some("all"),
        }
    }
}

#[cfg(test)]
mod tests {
    use domain::GeoPoint;

    use super::*;

    fn query(mode: RouteMode) -> RouteQuery {
        RouteQuery::new(
            GeoPoint::new_unchecked(118.875, 28.9783),
            GeoPoint::new_unchecked(118.6798, 28.5964),
            mode,
        )
    }

    #[test]
    fn driving_params_omit_transit_fields() {
        let config = AmapConfig::for_testing();
        let params = DirectionParams::new(&query(RouteMode::Driving), &config);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["origin"], "118.875,28.9783");
        assert_eq!(json["destination"], "118.6798,28.5964");
        assert_eq!(json["key"], "test-key");
        assert_eq!(json["output"], "json");
        assert!(json.get("city").is_none());
        assert!(json.get("extensions").is_none());
    }

    #[test]
    fn transit_params_include_city_and_type() {
        let config = AmapConfig::for_testing();
        let params = DirectionParams::new(&query(RouteMode::Transit), &config);

        assert_eq!(params.city, Some("衢州市"));
        assert_eq!(params.transit_type, Some("bus"));
        assert_eq!(params.extensions, Some("all"));
    }
}
