use std::fmt;

use crate::domain::DomainError;

/// Largest value accepted for one entered item.
pub const CALORIES_MAX: u32 = 100_000;

/// Energy in whole kilocalories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Calories(u32);

impl Calories {
    pub const ZERO: Self = Self(0);

    /// User-entered calories must be within `1..=CALORIES_MAX`.
    pub fn new(kcal: i64) -> Result<Self, DomainError> {
        if kcal < 1 {
            return Err(DomainError::CaloriesMustBePositive);
        }
        match u32::try_from(kcal) {
            Ok(kcal) if kcal <= CALORIES_MAX => Ok(Self(kcal)),
            _ => Err(DomainError::CaloriesTooLarge { max: CALORIES_MAX }),
        }
    }

    /// Stored values, including zero totals for empty days.
    pub fn reconstruct(kcal: u32) -> Self {
        Self(kcal)
    }

    pub fn kcal(&self) -> u32 {
        self.0
    }

    pub fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// `0.8 <= self / target <= 1.0`; never achieved against a zero target.
    pub fn is_achieved(&self, target: Self) -> bool {
        if target.0 == 0 {
            return false;
        }
        // 0.8 <= a / t  <=>  5a >= 4t
        u64::from(self.0) * 5 >= u64::from(target.0) * 4 && self.0 <= target.0
    }

    /// `self / target > 1.0`; against a zero target, over whenever anything was eaten.
    pub fn is_over(&self, target: Self) -> bool {
        if target.0 == 0 {
            return self.0 > 0;
        }
        self.0 > target.0
    }
}

impl std::iter::Sum for Calories {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::add)
    }
}

impl fmt::Display for Calories {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kcal", self.0)
    }
}
