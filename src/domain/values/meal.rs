//! Values describing one logged meal.

use time::OffsetDateTime;

use crate::domain::{Clock, DomainError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::ItemNameRequired);
        }
        Ok(Self(name.to_owned()))
    }

    pub fn reconstruct(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// When the meal was eaten; never after the clock's current instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EatenAt(OffsetDateTime);

impl EatenAt {
    pub fn new(at: OffsetDateTime, clock: &dyn Clock) -> Result<Self, DomainError> {
        if at > clock.now() {
            return Err(DomainError::EatenAtInFuture);
        }
        Ok(Self(at))
    }

    pub fn reconstruct(at: OffsetDateTime) -> Self {
        Self(at)
    }

    pub fn value(&self) -> OffsetDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FixedClock;
    use time::{macros::datetime, Duration};

    #[test]
    fn item_name_is_trimmed_and_required() {
        assert_eq!(ItemName::new("  rice ").map(|n| n.as_str().to_owned()), Ok("rice".into()));
        assert_eq!(ItemName::new("\t"), Err(DomainError::ItemNameRequired));
    }

    #[test]
    fn eaten_at_accepts_now_and_past_only() {
        let now = datetime!(2024-06-15 12:00 UTC);
        let clock = FixedClock(now);
        assert!(EatenAt::new(now, &clock).is_ok());
        assert!(EatenAt::new(now - Duration::days(3), &clock).is_ok());
        assert_eq!(
            EatenAt::new(now + Duration::seconds(1), &clock),
            Err(DomainError::EatenAtInFuture)
        );
    }

    #[test]
    fn eaten_at_compares_instants_across_offsets() {
        let clock = FixedClock(datetime!(2024-06-15 12:00 UTC));
        // 20:30 in +09:00 is 11:30 UTC.
        assert!(EatenAt::new(datetime!(2024-06-15 20:30 +09:00), &clock).is_ok());
    }
}
