//! Password hashing - Domain layer credential handling.
//!
//! `PasswordHasher` is the seam the auth service hashes and verifies through;
//! `Argon2Hasher` is the production implementation. Digests travel as the
//! `Password` value object so they never show up in debug output.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher as _,
        PasswordVerifier as _, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

#[cfg(test)]
use mockall::automock;

use crate::config::HashCost;
use crate::errors::{AppError, AppResult};

/// Stored password digest (PHC string).
///
/// DDD: Value object - immutable, compared by value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap an existing digest (from storage).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the digest string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the digest string.
    pub fn into_string(self) -> String {
        self.hash
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

/// Salted, adaptive one-way password hashing.
///
/// Both operations are CPU-bound; async callers should run them on a
/// blocking thread.
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    fn hash(&self, plain_text: &str) -> AppResult<Password>;

    /// Check a plain text password against a stored digest.
    ///
    /// A mismatch is `Ok(false)`; a digest that cannot be parsed is an error.
    fn verify(&self, plain_text: &str, digest: &Password) -> AppResult<bool>;
}

/// Argon2id hasher with configurable cost.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// Build a hasher from cost parameters.
    ///
    /// # Errors
    /// Returns an internal error if the parameters are outside Argon2's limits.
    pub fn new(cost: HashCost) -> AppResult<Self> {
        let params = Params::new(cost.memory_kib, cost.iterations, cost.parallelism, None)
            .map_err(|e| AppError::internal(format!("Invalid Argon2 parameters: {}", e)))?;
        Ok(Self { params })
    }

    #[inline]
    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plain_text: &str) -> AppResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }

    fn verify(&self, plain_text: &str, digest: &Password) -> AppResult<bool> {
        let parsed = PasswordHash::new(digest.as_str())
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

        // Cost parameters are read from the digest, not from `self.params`
        match self.argon2().verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!("Password verify failed: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(HashCost {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap()
    }

    #[test]
    fn test_password_hash_and_verify() {
        let hasher = hasher();
        let digest = hasher.hash("secret1").unwrap();

        assert!(hasher.verify("secret1", &digest).unwrap());
        assert!(!hasher.verify("wrong", &digest).unwrap());
    }

    #[test]
    fn test_digest_is_not_plaintext() {
        let digest = hasher().hash("secret1").unwrap();

        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(!digest.as_str().contains("secret1"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let hasher = hasher();
        let first = hasher.hash("SamePassword123").unwrap();
        let second = hasher.hash("SamePassword123").unwrap();

        // Different salts produce different hashes
        assert_ne!(first, second);
        // But both verify correctly
        assert!(hasher.verify("SamePassword123", &first).unwrap());
        assert!(hasher.verify("SamePassword123", &second).unwrap());
    }

    #[test]
    fn test_verify_uses_cost_from_digest() {
        let digest = hasher().hash("secret1").unwrap();
        let stronger = Argon2Hasher::new(HashCost {
            memory_kib: 512,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();

        assert!(stronger.verify("secret1", &digest).unwrap());
    }

    #[test]
    fn test_malformed_digest_is_error() {
        let result = hasher().verify("secret1", &Password::from_hash("not-a-hash".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_cost_rejected() {
        let result = Argon2Hasher::new(HashCost {
            memory_kib: 1,
            iterations: 0,
            parallelism: 1,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_hash() {
        let digest = hasher().hash("secret1").unwrap();
        let debug = format!("{:?}", digest);

        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("$argon2id$"));
    }
}
