//! # folio-server
//!
//! axum HTTP service over [`folio_db::service::FolioService`].
//!
//! Layers, outermost first: request tracing, request timeout, CORS, body
//! size limit. Errors are rendered by [`error::ApiError`].

pub mod cors;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use folio_config::FolioConfig;

use crate::state::AppState;

/// Build the application router with all middleware applied.
pub fn build_router(state: AppState, config: &FolioConfig) -> Router {
    routes::router()
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(cors::cors_layer(&config.cors, &config.cors_origins()))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
