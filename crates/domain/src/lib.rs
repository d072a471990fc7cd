//! Domain layer for the Quzhou tourism route service
//!
//! Contains the geometry and itinerary model, the fixed operating region,
//! and the typed errors raised while normalizing upstream payloads.
//! This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
