//! Quzhou tourism HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{RouteService, TripService};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AmapRouteAdapter, AppConfig, DeepSeekInferenceAdapter, ServerConfig, init_telemetry,
};
use presentation_http::{routes, state::AppState};
use tokio::{net::TcpListener, signal, sync::watch};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Held until exit so buffered spans are flushed on shutdown
    let telemetry = init_telemetry(&config.telemetry, config.server.log_format)
        .context("Failed to initialize telemetry")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        otel_export = telemetry.is_exporting(),
        "Quzhou tourism server starting"
    );

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.inference.default_model,
        amap_cache_ttl_secs = config.amap.cache_ttl_secs,
        "Configuration loaded"
    );

    let planner = AmapRouteAdapter::new(&config.amap.to_amap_config())
        .context("Failed to initialize AMap client")?;
    let inference = DeepSeekInferenceAdapter::new(config.inference.to_inference_config())
        .context("Failed to initialize inference")?;

    let route_service = RouteService::new(Arc::new(planner));
    let trip_service = match &config.inference.system_prompt {
        Some(prompt) => TripService::with_system_prompt(Arc::new(inference), prompt.clone()),
        None => TripService::new(Arc::new(inference)),
    };

    let state = AppState {
        route_service: Arc::new(route_service),
        trip_service: Arc::new(trip_service),
        config: Arc::new(config.clone()),
    };

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());
    let app = if config.server.cors_enabled {
        app.layer(cors_layer(&config.server))
    } else {
        app
    };

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    let (shutdown_tx, mut shutdown_rx) = watch::channel(());

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(());
    });

    // Starts counting only once a shutdown signal has arrived
    let drain_deadline = async move {
        if shutdown_rx.changed().await.is_ok() {
            info!(?shutdown_timeout, "Waiting for open connections to close");
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = async { server.await } => result?,
        () = drain_deadline => {
            warn!(?shutdown_timeout, "Connections still open after shutdown timeout");
        }
    }

    info!("Server shutdown complete");
    drop(telemetry);

    Ok(())
}

/// Allow any origin when none are configured, otherwise only the listed ones
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    if server.allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = server
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            },
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
