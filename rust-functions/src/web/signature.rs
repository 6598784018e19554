//! TrackingMore webhook signature verification.
//!
//! TrackingMore signs each webhook with HMAC-SHA256 over the raw request body,
//! keyed by the shared webhook secret, and sends the lowercase hex digest in the
//! `x-tmore-signature` header. The digest must be computed over the body exactly
//! as received; re-serializing the JSON would change the bytes.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded signature.
pub const SIGNATURE_HEADER: &str = "x-tmore-signature";

/// Compute the lowercase hex HMAC-SHA256 of `body` keyed by `secret`.
pub fn compute_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a TrackingMore webhook signature.
///
/// # Arguments
///
/// * `secret` - The shared webhook secret
/// * `body` - The raw, unparsed request body
/// * `signature` - The value of the `x-tmore-signature` header
///
/// # Returns
///
/// `true` only if `signature` equals the computed digest exactly.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let expected_signature = match compute_signature(secret, body) {
        Some(s) => s,
        None => {
            warn!("webhook_signature_invalid_key");
            return false;
        }
    };

    let valid = constant_time_compare(&expected_signature, signature);

    if !valid {
        warn!(
            expected_length = expected_signature.len(),
            actual_length = signature.len(),
            "webhook_signature_mismatch"
        );
    }

    valid
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
