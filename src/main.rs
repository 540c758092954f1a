//! Application entry point for the `agrismart-dashboard` service.
//!
//! This binary orchestrates the full startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Seeding the in-memory dashboard store and backfilling the sensor window
//! - Spawning the sensor ticker and the store event logger
//! - Mounting all API routes via the `routes` gateway
//! - Serving HTTP until Ctrl-C, then stopping the background tasks
//!
//! # Environment Variables
//! - `DASHBOARD_HOST` / `DASHBOARD_PORT` (optional) – bind address (default: `0.0.0.0:8080`)
//! - `TICK_INTERVAL_MS` (optional) – sensor tick period (default: 5000)
//! - `DASHBOARD_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `DASHBOARD_SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, sync::Arc};

use agrismart_dashboard::{config, routes, spawn_ticker, DashboardStore, StoreEvent};
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use anyhow::Result;

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let store = Arc::new(DashboardStore::new(cfg.sensor_window_hours));
    tracing::info!(
        "Seeded {} fields, {} sensor samples",
        store.fields().len(),
        store.sensor_series().len()
    );

    let cancel = CancellationToken::new();
    let events = tokio::spawn(log_store_events(store.clone(), cancel.clone()));
    let ticker = spawn_ticker(store.clone(), cfg.tick_interval(), cancel.clone());

    let addr = cfg.bind_addr()?;
    let app: Router = routes::router(store, cfg);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutting down background tasks");
    ticker.shutdown().await;
    cancel.cancel();
    events.await?;

    Ok(())
}

// ---

async fn shutdown_signal() {
    // ---
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Ctrl-C received");
}

/// Log every store mutation. The theme flag is presentation state that lives
/// outside the store's data, so its changes are logged at `info`.
async fn log_store_events(store: Arc<DashboardStore>, cancel: CancellationToken) {
    // ---
    let mut rx = store.subscribe();
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            event = rx.recv() => match event {
                Ok(StoreEvent::ThemeChanged { dark }) => {
                    tracing::info!("Display theme is now {}", if dark { "dark" } else { "light" });
                }
                Ok(StoreEvent::SensorTick { .. }) => {}
                Ok(event) => tracing::debug!(?event, "store changed"),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "store event logger fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }
}

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `DASHBOARD_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by `RUST_LOG`, else the `DASHBOARD_LOG_LEVEL` env var
///
/// Call once at startup before any logging macros run.
fn init_tracing() {
    // ---
    let span_events = match env::var("DASHBOARD_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    // Determine if we should use colors
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to DASHBOARD_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("DASHBOARD_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
