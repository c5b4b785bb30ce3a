//! Notifier trait and error types.

use async_trait::async_trait;

/// Errors that can occur while delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to send notification: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("notification failed with status: {0}")]
    Status(u16),
}

/// Result type for notification delivery.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Delivers a titled push message.
///
/// Delivery is attempted once. Only an HTTP 200 from the back end counts as
/// success; callers log failures and move on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `message` under `title`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] if the request could not be sent and
    /// [`NotifyError::Status`] for any response other than 200 OK.
    async fn send(&self, title: &str, message: &str) -> NotifyResult<()>;

    /// Short back end name for logs and the health endpoint.
    fn name(&self) -> &'static str;
}
