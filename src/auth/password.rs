use crate::error::AuthError;

/// bcrypt work factor. Kept at 10 rounds to match the cost the stored
/// hashes were produced with.
pub const HASH_COST: u32 = 10;

/// One-way hash with a per-call random salt embedded in the output.
pub fn hash(plaintext: &str) -> Result<String, AuthError> {
    Ok(bcrypt::hash(plaintext, HASH_COST)?)
}

/// Recomputes and compares. A mismatch is `Ok(false)`; only a malformed
/// stored hash is an error.
pub fn verify(plaintext: &str, hashed: &str) -> Result<bool, AuthError> {
    Ok(bcrypt::verify(plaintext, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AuthError;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hashed = hash("pw123").unwrap();
        assert_ne!(hashed, "pw123");
        assert!(verify("pw123", &hashed).unwrap());
        assert!(!verify("wrongpw", &hashed).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash("pw123").unwrap();
        let second = hash("pw123").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let result = verify("pw123", "not-a-bcrypt-hash");
        assert!(matches!(result, Err(AuthError::HashFormat(_))));
    }
}
