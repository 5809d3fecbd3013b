//! Digest helpers

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 digest
///
/// Cache keys for revoked tokens use the digest rather than the raw token id.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_distinct_token_ids() {
        assert_ne!(sha256_hex("jti-1"), sha256_hex("jti-2"));
        assert_eq!(sha256_hex("jti-1").len(), 64);
    }
}
