//! Page fetcher trait and error types.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::PageSnapshot;

/// Errors that can occur while rendering a listing page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("failed to fetch page: {0}")]
    Page(String),

    #[error("page did not finish within {0:?}")]
    Timeout(Duration),

    #[error("no page text returned for {0}")]
    NoText(String),

    #[error("empty stats text received")]
    EmptyStats,
}

/// Result type for page fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Renders a listing page and reads its stats, title and refinement labels.
///
/// Implementations must bound each fetch with their own timeout and must
/// never return a snapshot with blank stats text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::EmptyStats`] if the stats element has no text,
    /// [`FetchError::Timeout`] if the session outlives the configured bound,
    /// and [`FetchError::Launch`] / [`FetchError::Page`] for browser failures.
    async fn fetch(&self, url: &str) -> FetchResult<PageSnapshot>;
}
