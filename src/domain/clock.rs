//! Time source injected into every time-sensitive constructor.

use time::{Date, OffsetDateTime, UtcOffset};

/// Provides the current instant.
///
/// Implementations must be read-only and safe to call from any thread.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    /// Calendar day of [`Clock::now`] in the clock's own offset.
    fn today(&self) -> Date {
        self.now().date()
    }

    /// Local midnight starting `date`, in the clock's offset.
    fn start_of(&self, date: Date) -> OffsetDateTime {
        date.midnight().assume_offset(self.now().offset())
    }
}

/// Wall clock reporting time in a fixed UTC offset (the user's location).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(UtcOffset::UTC)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::utc()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
