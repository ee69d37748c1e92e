use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Argon2id hash in PHC string format.
pub fn hash_password(plain: &str) -> Result<String, String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| format!("Failed to hash password: {}", e))
}

/// Constant-time verification; malformed stored hashes simply fail.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_differs_per_salt() {
        let first = hash_password("s3cret-password").unwrap();
        let second = hash_password("s3cret-password").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("s3cret-password", &first));
        assert!(verify_password("s3cret-password", &second));
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("s3cret-password").unwrap();
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn malformed_hash_fails_closed() {
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_password("anything", ""));
    }
}
