//! Venue booking web frontend.
//!
//! Serves the booking wizard's JSON API: quotes, step validation, wizard
//! transitions and booking submission. Spaces and bookings live in the
//! backend API; this service reads the former and forwards the latter.

pub mod backend;
pub mod booking;
pub mod cache;
pub mod config;
pub mod error;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::{BackendClient, BackendResult};
use crate::cache::AppCache;
use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: BackendClient,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(config: Config) -> BackendResult<Self> {
        let backend = BackendClient::new(&config)?;
        let cache = AppCache::new(&config);
        Ok(Self {
            config: Arc::new(config),
            backend,
            cache,
        })
    }
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", booking::router())
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "backend": state.config.backend_url,
        "cache": state.cache.stats(),
    }))
}
