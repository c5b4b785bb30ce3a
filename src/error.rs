use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::check::CheckResponse;
use crate::infrastructure::browser::FetchError;
use crate::utils::count_extractor::ExtractError;

/// Reasons a single target could not be checked.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

/// Errors returned by HTTP handlers.
///
/// Rendered as `{"status": "error", "message": ..., "timestamp": ...}` with the
/// matching status code.
#[derive(Debug)]
pub enum AppError {
    Unauthorized { message: String },
    MethodNotAllowed { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn method_not_allowed(message: impl Into<String>) -> Self {
        Self::MethodNotAllowed {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Unauthorized { message }
            | AppError::MethodNotAllowed { message }
            | AppError::Internal { message } => message,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }

        (status, Json(CheckResponse::error(message))).into_response()
    }
}
