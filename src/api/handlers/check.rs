//! Handlers for the on-demand listing check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::check::CheckResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Runs one pass over every configured target and reports the counts.
///
/// # Endpoint
///
/// `GET /api/check`
///
/// # Authentication
///
/// Requires `X-API-Key`; enforced by [`crate::api::middleware::auth::layer`].
///
/// # Response
///
/// One entry per target that could be checked, in configuration order.
/// Targets whose page could not be fetched or parsed are logged and left out.
///
/// # Errors
///
/// Returns 500 Internal Server Error if stored counts could not be saved.
pub async fn check_handler(State(state): State<AppState>) -> Result<Json<CheckResponse>, AppError> {
    let report = state
        .monitor_service
        .check_all()
        .await
        .map_err(|e| AppError::internal(e.to_string()))?;

    tracing::info!(
        "Check finished: {} updated, {} changed, {} failed",
        report.updates.len(),
        report.changed().count(),
        report.failures.len()
    );

    Ok(Json(CheckResponse::success(report.updates)))
}

/// Rejects any method other than GET on the check endpoint.
///
/// Installed as the method fallback so it runs before authentication.
pub async fn method_not_allowed_handler() -> AppError {
    AppError::method_not_allowed("Method not allowed")
}
