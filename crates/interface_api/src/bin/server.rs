//! Fund Tracker - API Server Binary
//!
//! This binary starts the HTTP API server for the fund returns dashboard.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin fund-tracker-api
//!
//! # Serve only the bundled dataset
//! TRACKER_USE_UPSTREAM=false cargo run --bin fund-tracker-api
//! ```
//!
//! # Environment Variables
//!
//! * `TRACKER_HOST` - Server host (default: 0.0.0.0)
//! * `TRACKER_PORT` - Server port (default: 8080)
//! * `TRACKER_UPSTREAM_BASE_URL` - Upstream fund service (default: http://localhost:5000)
//! * `TRACKER_UPSTREAM_TIMEOUT_SECS` - Bound on each upstream call, retries included (default: 10)
//! * `TRACKER_UPSTREAM_RETRIES` - Retries for transient upstream failures (default: 2)
//! * `TRACKER_USE_UPSTREAM` - Set to false to skip the upstream entirely (default: true)
//! * `TRACKER_NOTES_DIR` - Directory for persisted notes (default: ./data)
//! * `TRACKER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `TRACKER_LOG_JSON` - Emit JSON log lines (default: false)

use std::net::SocketAddr;
use std::sync::Arc;

use core_kernel::SystemClock;
use interface_api::{config::ApiConfig, create_router, AppState};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the data sources and notes
/// storage, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration in the environment is invalid
/// - The upstream client or the notes directory cannot be set up
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config()?;

    init_tracing(&config.log_level, config.log_json);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        upstream = %config.upstream_base_url,
        use_upstream = config.use_upstream,
        "Starting Fund Tracker API Server"
    );

    let state = AppState::from_config(config.clone(), Arc::new(SystemClock))?;

    // Warm the snapshot so the first dashboard request reports a real origin
    let initial = state.funds.load_funds().await;
    tracing::info!(funds = initial.funds.len(), origin = ?initial.origin, "Initial fund load");

    let app = create_router(state);

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from `TRACKER_*` environment variables.
///
/// Unset variables keep their defaults.
///
/// # Errors
///
/// Returns error if a variable is set to a value of the wrong type
fn load_config() -> Result<ApiConfig, config::ConfigError> {
    ApiConfig::from_env()
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` takes precedence over the configured level.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
/// * `json` - Whether to emit JSON lines
fn init_tracing(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
