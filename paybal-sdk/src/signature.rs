//! App proxy signature algorithm and verification.
//!
//! Storefront requests forwarded through the app proxy (`/apps/...`) carry
//! a `signature` query parameter:
//!
//! ```text
//! signature = hex(HMAC-SHA256(message, app_secret))
//! message   = concat(sorted("{key}={value}"))   // `signature` itself excluded
//! ```
//!
//! Keys that appear more than once have their values joined with `,`.
//! Pairs are concatenated without any separator.

use std::collections::BTreeMap;

/// Query parameter carrying the hex signature.
pub const SIGNATURE_PARAM: &str = "signature";

/// Query parameter carrying the unix timestamp of the proxied request.
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Maximum allowed age of a signature (in seconds).
pub const MAX_SIGNATURE_AGE: i64 = 5 * 60;

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing signature parameter")]
    Missing,
    #[error("invalid hex encoding")]
    InvalidHex,
    #[error("invalid timestamp parameter")]
    InvalidTimestamp,
    #[error("invalid signature")]
    SignatureMismatch,
    #[error("signature expired")]
    Expired,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

// ---------------------------------------------------------------------------
// Message construction
// ---------------------------------------------------------------------------

/// Build the signed message from a raw (still percent-encoded) query string.
///
/// Returns the message and the hex signature if one was present.
pub fn proxy_message(raw_query: &str) -> (String, Option<String>) {
    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut signature = None;

    for (key, value) in url::form_urlencoded::parse(raw_query.as_bytes()) {
        if key == SIGNATURE_PARAM {
            signature = Some(value.into_owned());
            continue;
        }
        params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let message = params
        .iter()
        .map(|(key, values)| format!("{key}={}", values.join(",")))
        .collect::<String>();
    (message, signature)
}

/// Sign a query string the way the app proxy does. Returns the hex digest.
pub fn sign_query(raw_query: &str, key: &[u8]) -> String {
    let (message, _) = proxy_message(raw_query);
    let tag = ring::hmac::sign(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
        message.as_bytes(),
    );
    hex::encode(tag.as_ref())
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify an app proxy query string: HMAC first, then timestamp freshness.
pub fn verify_query(raw_query: &str, key: &[u8]) -> Result<(), SignatureError> {
    let (message, signature) = proxy_message(raw_query);
    let signature = signature.ok_or(SignatureError::Missing)?;
    let signature = hex::decode(&signature).map_err(|_| SignatureError::InvalidHex)?;

    ring::hmac::verify(
        &ring::hmac::Key::new(ring::hmac::HMAC_SHA256, key),
        message.as_bytes(),
        &signature,
    )?;

    let timestamp = url::form_urlencoded::parse(raw_query.as_bytes())
        .find(|(key, _)| key == TIMESTAMP_PARAM)
        .and_then(|(_, value)| value.parse::<i64>().ok())
        .ok_or(SignatureError::InvalidTimestamp)?;
    check_timestamp(timestamp)
}

/// Check that a signature timestamp is within [`MAX_SIGNATURE_AGE`].
pub fn check_timestamp(timestamp: i64) -> Result<(), SignatureError> {
    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    if now - timestamp > MAX_SIGNATURE_AGE {
        return Err(SignatureError::Expired);
    }
    Ok(())
}
