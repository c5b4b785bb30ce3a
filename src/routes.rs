//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health`     - Liveness and configuration summary (public)
//! - `GET /api/check`  - One check pass (`X-API-Key` required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Authentication** - Static API key on `/api/check`
//! - **Path normalization** - Trailing slash handling ([`app_service`])

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::check_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer())
}

/// The router as served: trailing slashes are trimmed before routing, so
/// `/api/check/` reaches the same handler as `/api/check`.
///
/// Path normalization has to wrap the router from outside; a layer added
/// with [`Router::layer`] only runs after a route has matched.
pub fn app_service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_router(state))
}
