//! Normalization core
//!
//! Pure, synchronous transformations between the raw payloads exchanged with
//! the routing provider and the language model and the domain model. Nothing
//! in here performs I/O, so every function is safe to call from any task.

pub mod coordinate_validator;
pub mod itinerary_parser;
pub mod polyline;
pub mod route_shape;
pub mod sanitizer;

pub use coordinate_validator::validate_lat_lng;
pub use itinerary_parser::parse_itinerary;
pub use polyline::{decode_polyline, encode_polyline};
pub use route_shape::{check_upstream_status, extract_polyline};
pub use sanitizer::sanitize_model_output;
