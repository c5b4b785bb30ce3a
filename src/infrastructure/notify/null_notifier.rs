//! Notifier that only logs.

use async_trait::async_trait;
use tracing::info;

use super::service::{NotifyResult, Notifier};

/// Logs notifications instead of delivering them.
///
/// Selected with `NOTIFIER=none`; handy for dry runs against live pages.
#[derive(Debug, Default)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, title: &str, message: &str) -> NotifyResult<()> {
        info!("[notification not sent] {}: {}", title, message);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}
