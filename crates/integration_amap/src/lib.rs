//! AMap direction API integration
//!
//! Fetches raw route responses from the [AMap Web Service](https://lbs.amap.com)
//! direction endpoints for driving, walking and integrated bus transit.
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern consistent with other integration crates.
//! [`AmapClient`] defines the interface, implemented by [`HttpAmapClient`].
//! Responses are returned as untyped JSON; the shape of the `route` field
//! varies between endpoints and is resolved by the application layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::{GeoPoint, RouteMode, RouteQuery};
//! use integration_amap::{AmapClient, AmapConfig, HttpAmapClient};
//!
//! let config = AmapConfig {
//!     api_key: "your-key".to_string(),
//!     ..AmapConfig::default()
//! };
//! let client = HttpAmapClient::new(&config)?;
//!
//! let query = RouteQuery::new(
//!     GeoPoint::new_unchecked(118.8750, 28.9783),
//!     GeoPoint::new_unchecked(118.6798, 28.5964),
//!     RouteMode::Driving,
//! );
//! let response = client.fetch_route(&query).await?;
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{AmapClient, HttpAmapClient};
pub use config::{
    AmapConfig, DEFAULT_CITY, DEFAULT_DRIVING_URL, DEFAULT_TRANSIT_TYPE, DEFAULT_TRANSIT_URL,
    DEFAULT_WALKING_URL,
};
pub use error::AmapError;
