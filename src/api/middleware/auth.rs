//! Static API key authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

/// Header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Authenticates requests using the `X-API-Key` header.
///
/// # Header Format
///
/// ```text
/// X-API-Key: <key>
/// ```
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, not valid UTF-8, or
/// does not match the configured key. The wrapped handler is not called, so
/// no page is fetched for unauthenticated requests.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{routing::get, middleware};
///
/// let route = get(check_handler)
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    st.auth_service.authenticate(presented)?;

    Ok(next.run(req).await)
}
