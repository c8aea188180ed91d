//! HTTP API Layer
//!
//! This crate provides the REST API for the fund tracker using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each surface (relay, dashboard, notes, portfolio, health)
//! - **Middleware**: Request ids, tracing, request logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let state = AppState::from_config(config, Arc::new(SystemClock))?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use tokio::sync::Mutex;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use core_kernel::Clock;
use domain_fund::adapters::{StaticFundSource, UpstreamFundSource};
use domain_fund::{FundDataService, FundSource, Portfolio};
use domain_notes::NotesStore;
use infra_store::{FileKeyValueStore, KeyValueNoteRepository};

use crate::config::ApiConfig;
use crate::error::StartupError;
use crate::handlers::{dashboard, health, notes, portfolio, relay};
use crate::middleware::{request_logging, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Source the relay endpoints pass through to
    pub relay: Arc<dyn FundSource>,
    /// Primary + fallback loader behind the dashboard
    pub funds: Arc<FundDataService>,
    pub notes: Arc<NotesStore>,
    /// In-memory holdings
    pub portfolio: Arc<Mutex<Portfolio>>,
    pub clock: Arc<dyn Clock>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires sources and stores from configuration
    ///
    /// With `use_upstream` off, the bundled dataset serves as both tiers.
    pub fn from_config(config: ApiConfig, clock: Arc<dyn Clock>) -> Result<Self, StartupError> {
        let bundled: Arc<dyn FundSource> = Arc::new(StaticFundSource::bundled());

        let relay: Arc<dyn FundSource> = if config.use_upstream {
            Arc::new(UpstreamFundSource::new(config.upstream()).map_err(StartupError::Upstream)?)
        } else {
            bundled.clone()
        };

        let funds = FundDataService::new(relay.clone(), bundled)
            .with_timeout(config.upstream_timeout());

        let store = FileKeyValueStore::open(&config.notes_dir)?;
        let repository = KeyValueNoteRepository::new(Arc::new(store));
        let notes = NotesStore::open(Arc::new(repository), clock.clone());

        info!(
            relay = relay.name(),
            notes_dir = %config.notes_dir.display(),
            notes = notes.len(),
            "Application state ready"
        );

        Ok(Self {
            relay,
            funds: Arc::new(funds),
            notes: Arc::new(notes),
            portfolio: Arc::new(Mutex::new(Portfolio::new())),
            clock,
            config,
        })
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Relay routes
    let relay_routes = Router::new()
        .route("/funds", get(relay::get_funds))
        .route("/refresh", post(relay::refresh));

    // Dashboard routes
    let dashboard_routes = Router::new()
        .route("/funds", get(dashboard::list_funds))
        .route("/funds/:id", get(dashboard::get_fund))
        .route("/summary", get(dashboard::summary))
        .route("/categories", get(dashboard::categories))
        .route("/export", get(dashboard::export))
        .route("/refresh", post(dashboard::refresh));

    // Notes routes
    let notes_routes = Router::new()
        .route("/", get(notes::list_notes).post(notes::create_note))
        .route("/:id", put(notes::update_note).delete(notes::delete_note));

    // Portfolio routes
    let portfolio_routes = Router::new()
        .route("/", get(portfolio::get_portfolio).post(portfolio::add_investment))
        .route("/:id", delete(portfolio::remove_investment));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .nest("/api", relay_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/notes", notes_routes)
        .nest("/portfolio", portfolio_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(request_logging))
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
