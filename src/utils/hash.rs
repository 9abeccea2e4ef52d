//! Secret hashing helper
//!
//! Issuance callers hash a key secret before handing it to this crate, so
//! the raw secret never reaches a record or the store.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of `secret`.
pub fn sha256_hex(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    hex::encode(digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_hex_is_deterministic() {
        assert_eq!(sha256_hex("secret-1"), sha256_hex("secret-1"));
        assert_ne!(sha256_hex("secret-1"), sha256_hex("secret-2"));
    }

    #[test]
    fn test_sha256_hex_never_equals_input() {
        let secret = "secret-1";
        let hash = sha256_hex(secret);
        assert_ne!(hash, secret);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_sha256_hex_known_vector() {
        assert_eq!(
            sha256_hex(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
