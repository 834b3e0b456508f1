use time::{macros::format_description, Date};

use crate::domain::{Clock, DomainError};

pub const BIRTH_DATE_MAX_YEARS: i32 = 150;

/// Date of birth; strictly before today and at most 150 years ago.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthDate(Date);

impl BirthDate {
    pub fn new(date: Date, clock: &dyn Clock) -> Result<Self, DomainError> {
        let today = clock.today();
        if date >= today {
            return Err(DomainError::BirthDateNotInPast);
        }
        if date < years_before(today, BIRTH_DATE_MAX_YEARS) {
            return Err(DomainError::BirthDateTooOld {
                max_years: BIRTH_DATE_MAX_YEARS,
            });
        }
        Ok(Self(date))
    }

    /// Parses `YYYY-MM-DD` then applies [`BirthDate::new`].
    pub fn parse(raw: &str, clock: &dyn Clock) -> Result<Self, DomainError> {
        let date = Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
            .map_err(|_| DomainError::BirthDateInvalidFormat)?;
        Self::new(date, clock)
    }

    pub fn reconstruct(date: Date) -> Self {
        Self(date)
    }

    pub fn date(&self) -> Date {
        self.0
    }

    /// Completed years of life as of the clock's current day.
    pub fn age(&self, clock: &dyn Clock) -> u32 {
        self.age_on(clock.today())
    }

    pub fn age_on(&self, today: Date) -> u32 {
        let mut years = today.year() - self.0.year();
        let birthday_pending =
            (today.month() as u8, today.day()) < (self.0.month() as u8, self.0.day());
        if birthday_pending {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }
}

/// Same calendar day `years` earlier; Feb 29 falls back to Feb 28.
fn years_before(today: Date, years: i32) -> Date {
    let year = today.year() - years;
    Date::from_calendar_date(year, today.month(), today.day())
        .or_else(|_| Date::from_calendar_date(year, today.month(), today.day() - 1))
        .unwrap_or(Date::MIN)
}
