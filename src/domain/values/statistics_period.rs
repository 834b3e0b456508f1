use std::fmt;

use time::{Date, Duration};

use crate::domain::DomainError;

/// Window of days covered by a statistics request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatisticsPeriod {
    #[default]
    Week,
    Month,
    Year,
}

impl StatisticsPeriod {
    /// Empty input selects the default period instead of failing.
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        match raw.trim() {
            "" => Ok(Self::default()),
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            _ => Err(DomainError::InvalidStatisticsPeriod),
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }

    /// Inclusive first day of the window that ends on `today`.
    pub fn start(&self, today: Date) -> Date {
        today - Duration::days(self.days() - 1)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl fmt::Display for StatisticsPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
