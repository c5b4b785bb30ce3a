//! Pushover message API notifier.

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::info;

use super::service::{NotifyError, NotifyResult, Notifier};

/// Default Pushover message endpoint.
pub const PUSHOVER_API: &str = "https://api.pushover.net/1/messages.json";

/// Sends messages through the Pushover API as form-encoded
/// `token`, `user`, `title` and `message` fields.
pub struct PushoverNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_token: String,
    user_key: String,
}

impl PushoverNotifier {
    /// Creates a notifier for the public Pushover API.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Client`] if the HTTP client cannot be built.
    pub fn new(api_token: impl Into<String>, user_key: impl Into<String>) -> NotifyResult<Self> {
        Self::with_endpoint(PUSHOVER_API, api_token, user_key)
    }

    /// Creates a notifier posting to a custom endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Client`] if the HTTP client cannot be built.
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_token: impl Into<String>,
        user_key: impl Into<String>,
    ) -> NotifyResult<Self> {
        Ok(Self {
            client: super::http_client()?,
            endpoint: endpoint.into(),
            api_token: api_token.into(),
            user_key: user_key.into(),
        })
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, title: &str, message: &str) -> NotifyResult<()> {
        let form = [
            ("token", self.api_token.as_str()),
            ("user", self.user_key.as_str()),
            ("title", title),
            ("message", message),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(NotifyError::Transport)?;

        if response.status() != StatusCode::OK {
            return Err(NotifyError::Status(response.status().as_u16()));
        }

        info!("Notification sent successfully via Pushover");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "pushover"
    }
}
