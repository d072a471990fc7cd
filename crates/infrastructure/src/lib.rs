//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the AMap and
//! DeepSeek clients, and owns configuration loading and telemetry setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AmapAppConfig, AppConfig, InferenceAppConfig, LogFormat, ServerConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
