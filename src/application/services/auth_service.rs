//! Authentication service for the static API key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

const KEY_CHECK_LABEL: &[u8] = b"listing-monitor/api-key";

/// Validates the `X-API-Key` header against the configured key.
///
/// Both keys are reduced to HMAC-SHA256 tags and compared with
/// [`Mac::verify_slice`], which runs in constant time regardless of where
/// the keys first differ.
pub struct AuthService {
    expected_tag: Vec<u8>,
}

impl AuthService {
    /// Creates the service for `api_key`.
    pub fn new(api_key: &str) -> Self {
        Self {
            expected_tag: keyed_mac(api_key).finalize().into_bytes().to_vec(),
        }
    }

    /// Checks a presented key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the key is missing or wrong.
    pub fn authenticate(&self, presented: Option<&str>) -> Result<(), AppError> {
        let presented = presented.ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        keyed_mac(presented)
            .verify_slice(&self.expected_tag)
            .map_err(|_| AppError::unauthorized("Unauthorized"))
    }
}

fn keyed_mac(key: &str) -> HmacSha256 {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts any key length");
    mac.update(KEY_CHECK_LABEL);
    mac
}
