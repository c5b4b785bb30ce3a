//! API route configuration.

use crate::api::handlers::{check_handler, method_not_allowed_handler};
use crate::api::middleware::auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{MethodFilter, on},
};

/// API routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `GET /check` - Run one pass over all targets (requires `X-API-Key`)
///
/// Any other method on `/check`, HEAD included, gets `405 Method Not Allowed`.
/// The method fallback sits outside the authentication layer, so a wrong
/// method is reported before a missing key.
pub fn check_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        "/check",
        on(MethodFilter::GET, check_handler)
            .route_layer(middleware::from_fn_with_state(state, auth::layer))
            .fallback(method_not_allowed_handler),
    )
}
