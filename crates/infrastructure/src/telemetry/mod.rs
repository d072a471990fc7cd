//! Telemetry and distributed tracing infrastructure
//!
//! Console logging plus optional OpenTelemetry export to an OTLP collector.

mod otel;

pub use otel::{TelemetryConfig, TelemetryError, TelemetryGuard, init_telemetry};
