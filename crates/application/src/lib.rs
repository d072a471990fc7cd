//! Application layer - Use cases and orchestration
//!
//! Contains the normalization core (coordinate validation, polyline
//! decoding, route shape resolution, model output sanitizing and itinerary
//! parsing), the port definitions for the routing provider and the language
//! model, and the services that orchestrate them.

pub mod error;
pub mod normalization;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
