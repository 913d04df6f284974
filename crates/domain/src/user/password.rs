//! One-way password hashing capability.

use secrecy::{ExposeSecret, SecretString};

use crate::error::PasswordHashError;

/// Turns a plaintext password into a one-way hash.
///
/// Implementations may block; the user service runs them on the blocking
/// thread pool.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &SecretString) -> Result<String, PasswordHashError>;
}

/// bcrypt-backed hasher.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Creates a hasher with the given bcrypt cost (4..=31).
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, plaintext: &SecretString) -> Result<String, PasswordHashError> {
        bcrypt::hash(plaintext.expose_secret(), self.cost)
            .map_err(|e| PasswordHashError::new(e.to_string()))
    }
}
