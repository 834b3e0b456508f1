//! Per-day calorie totals classified against a target.

use std::collections::BTreeMap;

use time::{Date, Duration};

use super::{Calories, Clock, Record, StatisticsPeriod};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCalories {
    pub date: Date,
    pub calories: Calories,
    pub achieved: bool,
    pub over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalorieStatistics {
    pub period: StatisticsPeriod,
    pub target: Calories,
    /// One entry per day of the period, oldest first, empty days included.
    pub days: Vec<DailyCalories>,
}

impl CalorieStatistics {
    pub fn achieved_days(&self) -> usize {
        self.days.iter().filter(|d| d.achieved).count()
    }

    pub fn over_days(&self) -> usize {
        self.days.iter().filter(|d| d.over).count()
    }

    pub fn total(&self) -> Calories {
        self.days.iter().map(|d| d.calories).sum()
    }
}

/// Sum `records` per local calendar day over the period ending today.
///
/// Records outside the window are ignored.
pub fn calorie_statistics(
    records: &[Record],
    target: Calories,
    period: StatisticsPeriod,
    clock: &dyn Clock,
) -> CalorieStatistics {
    let now = clock.now();
    let today = now.date();
    let first = period.start(today);

    let mut totals: BTreeMap<Date, Calories> = BTreeMap::new();
    for record in records {
        let day = record.eaten_at().value().to_offset(now.offset()).date();
        if day < first || day > today {
            continue;
        }
        let total = totals.entry(day).or_default();
        *total = total.add(record.total_calories());
    }

    let days = (0..period.days())
        .map(|offset| {
            let date = first + Duration::days(offset);
            let calories = totals.get(&date).copied().unwrap_or(Calories::ZERO);
            DailyCalories {
                date,
                calories,
                achieved: calories.is_achieved(target),
                over: calories.is_over(target),
            }
        })
        .collect();

    CalorieStatistics {
        period,
        target,
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FixedClock, NewRecordItem, UserId};
    use time::{macros::datetime, OffsetDateTime};

    fn record(at: OffsetDateTime, kcal: i64, clock: &dyn Clock) -> Record {
        Record::new(
            UserId::generate(),
            at,
            &[NewRecordItem {
                name: "meal",
                calories: kcal,
            }],
            clock,
        )
        .expect("valid record")
    }

    #[test]
    fn groups_by_local_day_and_classifies() {
        let clock = FixedClock(datetime!(2024-06-15 20:00 +09:00));
        let records = vec![
            record(datetime!(2024-06-15 08:00 +09:00), 900, &clock),
            record(datetime!(2024-06-15 12:00 +09:00), 800, &clock),
            // 2024-06-14 16:00 UTC is 2024-06-15 01:00 local
            record(datetime!(2024-06-14 16:00 UTC), 100, &clock),
            record(datetime!(2024-06-14 19:00 +09:00), 2100, &clock),
            // outside the week
            record(datetime!(2024-06-01 19:00 +09:00), 1500, &clock),
        ];

        let stats = calorie_statistics(
            &records,
            Calories::reconstruct(2000),
            StatisticsPeriod::Week,
            &clock,
        );

        assert_eq!(stats.days.len(), 7);
        assert_eq!(stats.days[0].date, time::macros::date!(2024-06-09));

        let today = stats.days[6];
        assert_eq!(today.date, time::macros::date!(2024-06-15));
        assert_eq!(today.calories.kcal(), 1800);
        assert!(today.achieved && !today.over);

        let yesterday = stats.days[5];
        assert_eq!(yesterday.calories.kcal(), 2100);
        assert!(!yesterday.achieved && yesterday.over);

        let empty = stats.days[0];
        assert_eq!(empty.calories, Calories::ZERO);
        assert!(!empty.achieved && !empty.over);

        assert_eq!(stats.achieved_days(), 1);
        assert_eq!(stats.over_days(), 1);
        assert_eq!(stats.total().kcal(), 3900);
    }

    #[test]
    fn zero_target_marks_any_intake_as_over() {
        let clock = FixedClock(datetime!(2024-06-15 20:00 UTC));
        let records = vec![record(datetime!(2024-06-15 08:00 UTC), 10, &clock)];
        let stats = calorie_statistics(&records, Calories::ZERO, StatisticsPeriod::Week, &clock);
        assert_eq!(stats.over_days(), 1);
        assert_eq!(stats.achieved_days(), 0);
    }
}
