//! Kids KickLabs Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused. The binary in `main.rs` only adds
//! configuration loading, telemetry and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod error;
pub mod filters;
pub mod genai;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::{Router, middleware::from_fn, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Where bundled assets live, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Where markdown pages live, relative to the workspace root.
pub const CONTENT_DIR: &str = "crates/storefront/content";

/// Build the full storefront application.
///
/// Layers, outermost first: Sentry, request tracing, request id, security
/// headers, session. Rate limits are attached per route in [`routes`].
pub fn app(state: AppState) -> Router {
    app_with_static(state, Path::new(STATIC_DIR))
}

/// [`app`] with a custom static asset directory.
pub fn app_with_static(state: AppState, static_dir: &Path) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(session_layer)
        .layer(from_fn(middleware::security_headers_middleware))
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. There are no dependencies to check.
async fn health() -> &'static str {
    "ok"
}
