use crate::utils::AppError;

/// One-way salted password hashing
pub trait CredentialHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;

    /// Constant-time comparison of `plaintext` against a stored hash
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AppError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl CredentialHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        Ok(bcrypt::hash(plaintext, self.cost)?)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, AppError> {
        Ok(bcrypt::verify(plaintext, hash)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_salted_and_not_plaintext() {
        let hasher = BcryptHasher::new(4);
        let first = hasher.hash("p@ss").unwrap();
        let second = hasher.hash("p@ss").unwrap();

        assert!(!first.is_empty());
        assert_ne!(first, "p@ss");
        assert_ne!(first, second);
        assert!(first.starts_with("$2b$04$"));
    }

    #[test]
    fn test_verify() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("p@ss").unwrap();

        assert!(hasher.verify("p@ss", &hash).unwrap());
        assert!(!hasher.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_empty_password_still_hashes() {
        let hasher = BcryptHasher::new(4);
        let hash = hasher.hash("").unwrap();
        assert!(!hash.is_empty());
        assert!(hasher.verify("", &hash).unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_internal_error() {
        let hasher = BcryptHasher::new(4);
        let err = hasher.verify("p@ss", "not-a-bcrypt-hash").unwrap_err();
        assert!(err.is_internal());
    }
}
