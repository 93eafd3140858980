//! Webhook signature gate.
//!
//! The processor signs each delivery with a digest over the shared secret
//! and the raw request body; verification must happen on the raw bytes
//! before the payload is parsed or any state is touched.

use sha2::{Digest, Sha256};

/// Header carrying the processor's signature.
pub const SIGNATURE_HEADER: &str = "x-wallet-signature";

/// Hex digest of `secret || body`.
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(body);
    hex::encode(hasher.finalize())
}

/// Verify a provided signature against the shared secret and raw body.
pub fn verify_signature(secret: &str, body: &[u8], provided: &str) -> bool {
    let expected = compute_signature(secret, body);
    expected.eq_ignore_ascii_case(provided.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // sha256("secret" || "{}")
        let sig = compute_signature("secret", b"{}");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        // Stable across calls
        assert_eq!(sig, compute_signature("secret", b"{}"));
    }

    #[test]
    fn test_verify_accepts_case_insensitive_hex() {
        let body = br#"{"event":"transfer.success"}"#;
        let sig = compute_signature("s3cret", body);
        assert!(verify_signature("s3cret", body, &sig));
        assert!(verify_signature("s3cret", body, &sig.to_uppercase()));
        assert!(verify_signature("s3cret", body, &format!("  {}  ", sig)));
    }

    #[test]
    fn test_verify_rejects_tampering() {
        let body = br#"{"event":"transfer.success"}"#;
        let sig = compute_signature("s3cret", body);

        // Wrong secret
        assert!(!verify_signature("other", body, &sig));
        // Tampered body
        assert!(!verify_signature("s3cret", br#"{"event":"transfer.failed"}"#, &sig));
        // Garbage signature
        assert!(!verify_signature("s3cret", body, "deadbeef"));
    }
}
