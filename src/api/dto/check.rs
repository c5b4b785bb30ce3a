//! DTOs for the listing check endpoint.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::entities::ListingUpdate;

/// Envelope returned by `GET /api/check`, on success and on error.
///
/// ```json
/// {
///   "status": "success",
///   "message": "Listings checked successfully",
///   "timestamp": "2025-02-01T10:00:00Z",
///   "updates": [
///     { "url": "https://...", "searchTerm": "Boots (Size 42)", "currentCount": 58, "changed": false }
///   ]
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updates: Option<Vec<ListingUpdate>>,
}

impl CheckResponse {
    pub fn success(updates: Vec<ListingUpdate>) -> Self {
        Self {
            status: "success".to_string(),
            message: "Listings checked successfully".to_string(),
            timestamp: timestamp_now(),
            updates: Some(updates),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            timestamp: timestamp_now(),
            updates: None,
        }
    }
}

/// Current UTC time as RFC 3339 with second precision, e.g. `2025-02-01T10:00:00Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
