//! Payment callback signature verification
//!
//! The gateway signs `"{order_id}|{payment_id}"` with a shared secret.
//! Verification recomputes the HMAC-SHA256 locally and compares in
//! constant time via `ring::hmac::verify`; no network call is involved.

use ring::hmac;

fn signing_key(secret: &str) -> hmac::Key {
    hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes())
}

fn message(order_id: &str, payment_id: &str) -> String {
    format!("{order_id}|{payment_id}")
}

/// Hex HMAC-SHA256 signature over `"{order_id}|{payment_id}"`.
///
/// Exposed so tests and gateway stubs can produce valid callbacks.
pub fn sign(secret: &str, order_id: &str, payment_id: &str) -> String {
    let tag = hmac::sign(&signing_key(secret), message(order_id, payment_id).as_bytes());
    hex::encode(tag.as_ref())
}

/// Verify a hex signature against the locally recomputed HMAC.
///
/// Malformed hex is treated as a mismatch, never as an error.
pub fn verify(secret: &str, order_id: &str, payment_id: &str, signature_hex: &str) -> bool {
    let Ok(signature) = hex::decode(signature_hex) else {
        return false;
    };
    hmac::verify(
        &signing_key(secret),
        message(order_id, payment_id).as_bytes(),
        &signature,
    )
    .is_ok()
}
