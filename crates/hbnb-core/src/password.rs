//! Password digesting for `User` records.
//!
//! Passwords are stored as hex digests. Legacy records carry 32-char MD5
//! digests, new ones 64-char SHA-256 digests; both are recognized and kept
//! as-is so reconstructed data is never hashed twice.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of a plain-text password.
#[must_use]
pub fn digest(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

/// Whether a stored value already is a digest (MD5 or SHA-256 hex).
#[must_use]
pub fn is_digest(value: &str) -> bool {
    matches!(value.len(), 32 | 64) && value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Digest `value` unless it already is one. Empty passwords stay empty.
#[must_use]
pub fn ensure_digest(value: &str) -> String {
    if value.is_empty() || is_digest(value) {
        value.to_string()
    } else {
        digest(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_sha256_hex() {
        assert_eq!(
            digest("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(is_digest(&digest("pwd")));
    }

    #[test]
    fn legacy_md5_is_kept() {
        let md5 = "f4f6172eb26581952a70d7199bfd2ddb";
        assert_eq!(ensure_digest(md5), md5);
    }

    #[test]
    fn plain_values_are_digested_once() {
        let once = ensure_digest("hunter2");
        assert_ne!(once, "hunter2");
        assert_eq!(ensure_digest(&once), once);
    }

    #[test]
    fn empty_password_stays_empty() {
        assert_eq!(ensure_digest(""), "");
    }
}
