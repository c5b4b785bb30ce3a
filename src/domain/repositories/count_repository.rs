//! Repository trait for last-known listing counts.

use async_trait::async_trait;

/// Errors raised by count stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("count store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("count store is corrupt: {0}")]
    Format(#[from] serde_json::Error),
}

/// Result type for count store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for the last observed listing count of each URL.
///
/// Counts are only written after a successful fetch, so a failed check never
/// overwrites the baseline.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::MemoryCountRepository`] - Process-lifetime map (poll loop)
/// - [`crate::infrastructure::persistence::NullCountRepository`] - Forgets everything (HTTP mode default)
/// - [`crate::infrastructure::persistence::JsonFileCountRepository`] - Opt-in JSON file
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountRepository: Send + Sync {
    /// Returns the last stored count for `url`, or `None` before the baseline.
    async fn get_previous(&self, url: &str) -> StoreResult<Option<u64>>;

    /// Records `count` as the latest observation for `url`.
    async fn store(&self, url: &str, count: u64) -> StoreResult<()>;

    /// Makes stored counts durable. Called once at the end of every pass.
    async fn flush(&self) -> StoreResult<()>;
}
