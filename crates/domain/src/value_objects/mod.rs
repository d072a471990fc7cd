//! Value Objects - Immutable, identity-less domain primitives

mod bounding_region;
mod geo_point;
mod route_mode;

pub use bounding_region::BoundingRegion;
pub use geo_point::{GeoPoint, InvalidCoordinates};
pub use route_mode::RouteMode;
