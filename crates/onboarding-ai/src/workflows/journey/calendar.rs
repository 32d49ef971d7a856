//! Business-day arithmetic. Saturdays and Sundays are skipped; no holiday
//! calendar is modeled.

use chrono::{Datelike, NaiveDate, Weekday};

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the date `days` business days after `date`. `days == 0` yields
/// `date` itself, even when it falls on a weekend. `None` when the result
/// would pass [`NaiveDate::MAX`].
pub fn add_business_days(date: NaiveDate, days: u32) -> Option<NaiveDate> {
    let mut current = date;
    let mut remaining = days;

    while remaining > 0 {
        current = current.succ_opt()?;
        if is_business_day(current) {
            remaining -= 1;
        }
    }

    Some(current)
}

/// Counts the business days in `(start, end]`, i.e. how many
/// [`add_business_days`] steps lead from `start` to `end`.
pub fn business_days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut current = start;

    while let Some(next) = current.succ_opt().filter(|next| *next <= end) {
        if is_business_day(next) {
            count += 1;
        }
        current = next;
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn adding_zero_days_returns_the_same_day() {
        let saturday = date(2026, 2, 14);
        assert_eq!(add_business_days(saturday, 0), Some(saturday));
        assert_eq!(add_business_days(date(2026, 2, 9), 0), Some(date(2026, 2, 9)));
    }

    #[test]
    fn friday_plus_one_lands_on_monday() {
        assert_eq!(add_business_days(date(2026, 2, 13), 1), Some(date(2026, 2, 16)));
    }

    #[test]
    fn weekend_start_counts_from_next_monday() {
        assert_eq!(add_business_days(date(2026, 2, 14), 1), Some(date(2026, 2, 16)));
        assert_eq!(add_business_days(date(2026, 2, 15), 5), Some(date(2026, 2, 20)));
    }

    #[test]
    fn between_ignores_trailing_weekend() {
        let friday = date(2026, 2, 13);
        assert_eq!(business_days_between(friday, date(2026, 2, 15)), 0);
        assert_eq!(business_days_between(friday, friday), 0);
        assert_eq!(business_days_between(friday, date(2026, 2, 16)), 1);
    }

    #[test]
    fn between_is_zero_when_end_precedes_start() {
        assert_eq!(business_days_between(date(2026, 2, 16), date(2026, 2, 9)), 0);
    }

    #[test]
    fn end_of_calendar_is_reported_not_overflowed() {
        assert_eq!(add_business_days(NaiveDate::MAX, 1), None);
        assert_eq!(add_business_days(NaiveDate::MAX, 0), Some(NaiveDate::MAX));
        let near_end = NaiveDate::MAX - Duration::days(3);
        let weekdays = (1..=3)
            .filter(|offset| is_business_day(near_end + Duration::days(*offset)))
            .count() as u32;
        assert_eq!(business_days_between(near_end, NaiveDate::MAX), weekdays);
        assert_eq!(business_days_between(NaiveDate::MAX, NaiveDate::MAX), 0);
    }

    #[test]
    fn add_and_between_are_inverse_over_a_quarter() {
        let start = date(2026, 1, 1);
        for offset in 0..90 {
            let origin = start + Duration::days(offset);
            for n in 0..25 {
                let end = add_business_days(origin, n).expect("in range");
                assert!(n == 0 || is_business_day(end), "{origin} + {n} hit a weekend");
                assert_eq!(business_days_between(origin, end), n);
            }
        }
    }
}
