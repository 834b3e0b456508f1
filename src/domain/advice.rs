//! Memoized daily advice.

use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

use super::{Clock, DomainError, UserId};

/// Advice for one user on one local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceCache {
    user_id: UserId,
    /// Midnight of the day, in the offset of the instant it was built from.
    day: OffsetDateTime,
    advice: String,
    created_at: OffsetDateTime,
}

impl AdviceCache {
    pub fn new(
        user_id: UserId,
        at: OffsetDateTime,
        advice: &str,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let advice = advice.trim();
        if advice.is_empty() {
            return Err(DomainError::AdviceRequired);
        }
        Ok(Self {
            user_id,
            day: start_of_day(at),
            advice: advice.to_owned(),
            created_at: clock.now(),
        })
    }

    pub fn reconstruct(
        user_id: Uuid,
        day: OffsetDateTime,
        advice: String,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            user_id: UserId::reconstruct(user_id),
            day,
            advice,
            created_at,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn day(&self) -> OffsetDateTime {
        self.day
    }

    pub fn date(&self) -> Date {
        self.day.date()
    }

    pub fn advice(&self) -> &str {
        &self.advice
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// Midnight of `at`'s calendar day, keeping its offset.
pub fn start_of_day(at: OffsetDateTime) -> OffsetDateTime {
    at.replace_time(Time::MIDNIGHT)
}
