use std::fmt;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::domain::DomainError;

pub const PASSWORD_MIN_LEN: usize = 8;

/// Plain-text password accepted from the user. Only lives until hashed.
pub struct Password(String);

impl Password {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::PasswordRequired);
        }
        if raw.chars().count() < PASSWORD_MIN_LEN {
            return Err(DomainError::PasswordTooShort {
                min: PASSWORD_MIN_LEN,
            });
        }
        Ok(Self(raw.to_owned()))
    }

    /// Salted Argon2 hash; consumes the plain-text value.
    pub fn hash(self) -> Result<HashedPassword, DomainError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(self.0.as_bytes(), &salt)
            .map_err(|_| DomainError::PasswordHashFailed)?
            .to_string();
        Ok(HashedPassword(hash))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// PHC-formatted Argon2 hash.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn reconstruct(phc: String) -> Self {
        Self(phc)
    }

    /// `false` for a wrong password or an unparsable stored hash.
    pub fn verify(&self, plain: &str) -> bool {
        PasswordHash::new(&self.0)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword(..)")
    }
}
