//! ntfy push relay notifier.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::info;

use super::service::{NotifyError, NotifyResult, Notifier};

/// Publishes messages to an ntfy topic.
///
/// `POST {server}/{topic}` with the message as a plain-text body and the
/// title in the `Title` header.
pub struct NtfyNotifier {
    client: reqwest::Client,
    endpoint: String,
}

impl NtfyNotifier {
    /// Creates a notifier publishing to `topic` on `server`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Client`] if the HTTP client cannot be built.
    pub fn new(server: &str, topic: &str) -> NotifyResult<Self> {
        Ok(Self {
            client: super::http_client()?,
            endpoint: format!("{}/{}", server.trim_end_matches('/'), topic),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Notifier for NtfyNotifier {
    async fn send(&self, title: &str, message: &str) -> NotifyResult<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Title", title)
            .body(message.to_string())
            .send()
            .await
            .map_err(NotifyError::Transport)?;

        if response.status() != StatusCode::OK {
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        info!("Notification sent successfully via ntfy");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ntfy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_server_and_topic() {
        let notifier = NtfyNotifier::new("https://ntfy.sh/", "automonitor").unwrap();
        assert_eq!(notifier.endpoint(), "https://ntfy.sh/automonitor");

        let notifier = NtfyNotifier::new("https://push.example.com/relay", "shop").unwrap();
        assert_eq!(notifier.endpoint(), "https://push.example.com/relay/shop");
    }
}
