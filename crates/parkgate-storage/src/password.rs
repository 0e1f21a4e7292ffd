//! Salted password hashing for operator accounts.
//!
//! Stored form: a random hex salt and `hex(SHA-256(salt || password))`.
//! Verification compares the digests in constant time via the `subtle` crate.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Fresh random salt (32 hex characters).
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Hex SHA-256 of `salt || password`.
pub fn hash_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hasher.finalize().iter().map(|b| format!("{b:02x}")).collect()
}

/// Check `password` against a stored salt and hash.
pub fn verify_password(salt: &str, password: &str, expected_hash: &str) -> bool {
    let actual = hash_password(salt, password);
    actual.as_bytes().ct_eq(expected_hash.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let a = hash_password("salt", "admin");
        let b = hash_password("salt", "admin");
        let c = hash_password("other", "admin");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        let hash = hash_password(&salt, "s3creto");

        assert!(verify_password(&salt, "s3creto", &hash));
        assert!(!verify_password(&salt, "S3creto", &hash));
        assert!(!verify_password(&salt, "", &hash));
    }

    #[test]
    fn test_seeded_admin_hash() {
        // Matches the bootstrap row in the operators migration.
        assert!(verify_password(
            "0f3c9a7e5b2d4c1e8a6f9b3d2c7e1a40",
            "admin",
            "f09c3f2ec333828e498cdfe4c04db5fd93caaba6efd13d7b38626e699efb80ce",
        ));
    }

    #[test]
    fn test_salts_are_unique() {
        assert_ne!(generate_salt(), generate_salt());
        assert_eq!(generate_salt().len(), 32);
    }
}
