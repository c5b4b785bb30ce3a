//! Push notification back ends.
//!
//! Provides a [`Notifier`] trait with three implementations:
//! - [`NtfyNotifier`] - Topic-based push relay (plain-text body, `Title` header)
//! - [`PushoverNotifier`] - Form-encoded Pushover message API
//! - [`NullNotifier`] - Logs instead of sending

mod ntfy;
mod null_notifier;
mod pushover;
mod service;

pub use ntfy::NtfyNotifier;
pub use null_notifier::NullNotifier;
pub use pushover::PushoverNotifier;
pub use service::{NotifyError, NotifyResult, Notifier};

#[cfg(test)]
pub use service::MockNotifier;

use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

fn http_client() -> NotifyResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(NotifyError::Client)
}
