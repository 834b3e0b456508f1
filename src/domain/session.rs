//! Authentication session.
//!
//! A session is valid until `expires_at` inclusive and expired afterwards.
//! Expiry is computed on read; revocation is deletion by the repository.

use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use super::{Clock, DomainError, SessionId, UserId};

/// Lifetime of a freshly created session.
pub const SESSION_TTL: Duration = Duration::days(7);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    expires_at: OffsetDateTime,
    created_at: OffsetDateTime,
}

impl Session {
    /// Fails only when the OS random source is unavailable.
    pub fn new_with_user_id(user_id: UserId, clock: &dyn Clock) -> Result<Self, DomainError> {
        let now = clock.now();
        Ok(Self {
            id: SessionId::generate()?,
            user_id,
            expires_at: now + SESSION_TTL,
            created_at: now,
        })
    }

    /// Re-parses the stored token to catch corrupted rows.
    pub fn reconstruct(
        id: &str,
        user_id: Uuid,
        expires_at: OffsetDateTime,
        created_at: OffsetDateTime,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            id: SessionId::parse(id)?,
            user_id: UserId::reconstruct(user_id),
            expires_at,
            created_at,
        })
    }

    pub fn is_expired(&self, clock: &dyn Clock) -> bool {
        clock.now() > self.expires_at
    }

    pub fn validate_not_expired(&self, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.is_expired(clock) {
            return Err(DomainError::SessionExpired);
        }
        Ok(())
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn expires_at(&self) -> OffsetDateTime {
        self.expires_at
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}
