use std::fmt;

use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use rand::{rngs::OsRng, RngCore};

use crate::domain::DomainError;

/// Decoded length of a session token.
pub const SESSION_ID_BYTES: usize = 32;

/// Opaque session token: 256 random bits, URL-safe base64.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Fresh token from the OS CSPRNG.
    pub fn generate() -> Result<Self, DomainError> {
        let mut bytes = [0u8; SESSION_ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| DomainError::SessionIdGenerationFailed)?;
        Ok(Self(URL_SAFE.encode(bytes)))
    }

    /// Accepts only strings that decode to exactly 32 bytes.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let decoded = URL_SAFE
            .decode(raw)
            .map_err(|_| DomainError::InvalidSessionId)?;
        if decoded.len() != SESSION_ID_BYTES {
            return Err(DomainError::InvalidSessionId);
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionId(..)")
    }
}
