//! OpenTelemetry initialization and configuration
//!
//! Sets up the tracing subscriber with console output and, when enabled,
//! exports spans to an OTLP collector. Falls back to console-only logging
//! when the collector is unavailable.

use std::time::Duration;

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource,
    trace::{Sampler, SdkTracerProvider},
};
use serde::{Deserialize, Serialize};
use tracing::{Subscriber, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

use crate::config::LogFormat;

/// Configuration for telemetry/tracing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Whether OpenTelemetry export is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OTLP endpoint URL (e.g., "http://localhost:4317" for gRPC)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Service name for traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Sampling ratio (0.0 - 1.0)
    #[serde(default = "default_sampling_ratio")]
    pub sampling_ratio: f64,

    /// Export timeout in seconds
    #[serde(default = "default_export_timeout")]
    pub export_timeout_secs: u64,

    /// Log level filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Whether to fall back to console-only logging if OTLP export fails
    #[serde(default = "default_graceful_fallback")]
    pub graceful_fallback: bool,
}

const fn default_sampling_ratio() -> f64 {
    1.0
}

const fn default_export_timeout() -> u64 {
    10
}

fn default_endpoint() -> String {
    "http://localhost:4317".to_string()
}

fn default_service_name() -> String {
    "quzhou-tourism".to_string()
}

fn default_log_filter() -> String {
    "info,tower_http=info".to_string()
}

const fn default_graceful_fallback() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_endpoint(),
            service_name: default_service_name(),
            sampling_ratio: default_sampling_ratio(),
            export_timeout_secs: default_export_timeout(),
            log_filter: default_log_filter(),
            graceful_fallback: default_graceful_fallback(),
        }
    }
}

impl TelemetryConfig {
    /// Validate the telemetry section
    ///
    /// # Errors
    ///
    /// Returns an error if the sampling ratio is outside `0.0..=1.0`.
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.sampling_ratio) {
            return Err(format!(
                "telemetry.sampling_ratio must be between 0.0 and 1.0, got {}",
                self.sampling_ratio
            ));
        }
        if self.enabled && self.endpoint.trim().is_empty() {
            return Err("telemetry.endpoint must not be empty when enabled".to_string());
        }
        Ok(())
    }

    fn sampler(&self) -> Sampler {
        if (self.sampling_ratio - 1.0).abs() < f64::EPSILON {
            Sampler::AlwaysOn
        } else if self.sampling_ratio <= 0.0 {
            Sampler::AlwaysOff
        } else {
            Sampler::TraceIdRatioBased(self.sampling_ratio)
        }
    }
}

/// Guard that shuts down the tracer provider when dropped
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Whether spans are being exported
    #[must_use]
    pub const fn is_exporting(&self) -> bool {
        self.provider.is_some()
    }
}

impl std::fmt::Debug for TelemetryGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelemetryGuard")
            .field("active", &self.provider.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                tracing::error!("Failed to shutdown tracer provider: {:?}", e);
            }
        }
    }
}

/// Console layer in the requested format
fn fmt_layer<S>(format: LogFormat) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
    }
}

fn init_console(env_filter: EnvFilter, format: LogFormat) -> Result<(), TelemetryError> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer(format))
        .try_init()
        .map_err(|e| TelemetryError::Init(e.to_string()))
}

/// Initialize telemetry with the given configuration
///
/// Returns a guard that must be kept alive for the duration of the application.
/// When the guard is dropped, the tracer provider is shut down and pending
/// traces are flushed.
///
/// # Example
///
/// ```ignore
/// use infrastructure::{LogFormat, TelemetryConfig, init_telemetry};
///
/// let _guard = init_telemetry(&TelemetryConfig::default(), LogFormat::Json)?;
/// ```
pub fn init_telemetry(
    config: &TelemetryConfig,
    format: LogFormat,
) -> Result<TelemetryGuard, TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    if !config.enabled {
        init_console(env_filter, format)?;
        info!(%format, "Telemetry initialized (OTLP disabled, console only)");
        return Ok(TelemetryGuard { provider: None });
    }

    let exporter_result = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.endpoint)
        .with_timeout(Duration::from_secs(config.export_timeout_secs))
        .build();

    match exporter_result {
        Ok(exporter) => {
            let resource = Resource::builder()
                .with_service_name(config.service_name.clone())
                .build();

            let provider = SdkTracerProvider::builder()
                .with_batch_exporter(exporter)
                .with_sampler(config.sampler())
                .with_resource(resource)
                .build();

            let tracer = provider.tracer(config.service_name.clone());
            let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer(format))
                .with(otel_layer)
                .try_init()
                .map_err(|e| TelemetryError::Init(e.to_string()))?;

            info!(
                endpoint = %config.endpoint,
                service = %config.service_name,
                sampling = %config.sampling_ratio,
                "Telemetry initialized with OTLP export"
            );

            Ok(TelemetryGuard {
                provider: Some(provider),
            })
        },
        Err(e) => {
            if !config.graceful_fallback {
                return Err(TelemetryError::Exporter(e.to_string()));
            }

            init_console(env_filter, format)?;
            warn!(
                endpoint = %config.endpoint,
                error = %e,
                "OTLP collector unavailable, falling back to console-only logging"
            );
            Ok(TelemetryGuard { provider: None })
        },
    }
}

/// Error type for telemetry initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// Failed to create OTLP exporter
    #[error("Failed to create OTLP exporter: {0}")]
    Exporter(String),
}
