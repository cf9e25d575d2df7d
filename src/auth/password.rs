use crate::error::{ModelError, Result};
use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    hash(password, cost).map_err(|e| ModelError::PasswordHash(format!("{:?}", e)))
}

/// A malformed stored hash is treated as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_matching_password() {
        let hashed = hash_password("password0", 4).unwrap();
        assert_ne!(hashed, "password0");
        assert!(verify_password("password0", &hashed));
        assert!(!verify_password("password1", &hashed));
    }

    #[test]
    fn rejects_garbage_hash() {
        assert!(!verify_password("password0", "not-a-bcrypt-hash"));
    }

    #[test]
    fn rejects_out_of_range_cost() {
        assert!(matches!(
            hash_password("password0", 1),
            Err(ModelError::PasswordHash(_))
        ));
    }
}
