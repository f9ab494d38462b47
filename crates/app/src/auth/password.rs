//! Password hashing.

use bcrypt::{DEFAULT_COST, hash, verify};

pub(crate) fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    hash(password, DEFAULT_COST)
}

pub(crate) fn verify_password(
    password: &str,
    password_hash: &str,
) -> Result<bool, bcrypt::BcryptError> {
    verify(password, password_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hashed = hash_password("hunter2").expect("hashing should succeed");

        assert!(verify_password("hunter2", &hashed).expect("verify should succeed"));
        assert!(!verify_password("hunter3", &hashed).expect("verify should succeed"));
    }
}
