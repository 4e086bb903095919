//! Calendar arithmetic and event-day predicates.
//!
//! Everything here works on `chrono::NaiveDate`, i.e. on calendar components
//! with no time zone attached, so day counts are never disturbed by daylight
//! saving transitions.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

use super::types::EventFrequency;

/// Strips the time of day.
pub fn normalize_date(at: NaiveDateTime) -> NaiveDateTime {
    at.date().and_time(NaiveTime::MIN)
}

/// Today in local time, normalised to midnight.
pub fn today() -> NaiveDate {
    normalize_date(Local::now().naive_local()).date()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-based) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Adds `days` calendar days, saturating at the edge of chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days < 0 {
            NaiveDate::MIN
        } else {
            NaiveDate::MAX
        })
}

/// Adds `months` calendar months, clamping the day to the target month's
/// length (Jan 31 + 1 month is the last day of February).
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let month_index = date.year() * 12 + date.month0() as i32 + months;
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));

    // Saturates at the edge of chrono's representable range.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(if months < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

pub fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

/// Whole days from `from` to `to`; negative when `to` precedes `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    i64::from(to.num_days_from_ce()) - i64::from(from.num_days_from_ce())
}

pub fn is_weekday_event(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// True when `date` sits a whole number of weeks away from `anchor`, in
/// either direction.
pub fn is_weekly_event(date: NaiveDate, anchor: NaiveDate) -> bool {
    days_between(anchor, date) % 7 == 0
}

/// True when `date` carries the anchor's day of month, with anchors past the
/// end of a shorter month landing on its last day.
pub fn is_monthly_event(date: NaiveDate, anchor: NaiveDate) -> bool {
    let target = anchor.day().min(days_in_month(date.year(), date.month()));
    date.day() == target
}

pub fn is_event_day(date: NaiveDate, anchor: NaiveDate, frequency: EventFrequency) -> bool {
    match frequency {
        EventFrequency::Weekday => is_weekday_event(date),
        EventFrequency::Weekly => is_weekly_event(date, anchor),
        EventFrequency::Monthly => is_monthly_event(date, anchor),
    }
}

/// Every day from `start` to `end`, both inclusive.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
    }

    #[test]
    fn leap_year_rule_handles_centuries() {
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(2025));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn add_months_clamps_to_end_of_february() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2100, 1, 31), 1), date(2100, 2, 28));
        assert_eq!(add_months(date(2000, 1, 31), 1), date(2000, 2, 29));
    }

    #[test]
    fn add_months_clamps_to_thirty_day_months() {
        assert_eq!(add_months(date(2025, 3, 31), 1), date(2025, 4, 30));
        assert_eq!(add_months(date(2025, 8, 31), 1), date(2025, 9, 30));
    }

    #[test]
    fn add_months_crosses_year_boundaries_both_ways() {
        assert_eq!(add_months(date(2025, 11, 15), 3), date(2026, 2, 15));
        assert_eq!(add_months(date(2025, 1, 15), -1), date(2024, 12, 15));
        assert_eq!(add_months(date(2025, 3, 31), -13), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 6, 10), -18), date(2023, 12, 10));
    }

    #[test]
    fn add_years_is_twelve_months() {
        assert_eq!(add_years(date(2024, 2, 29), 1), date(2025, 2, 28));
        assert_eq!(add_years(date(2024, 2, 29), 4), date(2028, 2, 29));
        assert_eq!(add_years(date(2025, 7, 4), -2), date(2023, 7, 4));
    }

    #[test]
    fn add_days_saturates_at_calendar_edges() {
        assert_eq!(add_days(add_days(NaiveDate::MAX, -10), 36_526), NaiveDate::MAX);
        assert_eq!(add_days(add_days(NaiveDate::MIN, 10), -36_526), NaiveDate::MIN);
        assert_eq!(add_days(date(2025, 1, 1), i64::MAX), NaiveDate::MAX);
    }

    #[test]
    fn days_between_counts_calendar_days() {
        assert_eq!(days_between(date(2025, 1, 1), date(2025, 1, 1)), 0);
        assert_eq!(days_between(date(2024, 1, 1), date(2025, 1, 1)), 366);
        assert_eq!(days_between(date(2025, 1, 2), date(2025, 1, 1)), -1);
        // Spans both US daylight saving transitions of 2025.
        assert_eq!(days_between(date(2025, 3, 1), date(2025, 11, 30)), 274);
    }

    #[test]
    fn normalize_date_strips_time_of_day() {
        let at = date(2025, 3, 9).and_hms_opt(23, 59, 59).expect("valid time");
        let normalized = normalize_date(at);
        assert_eq!(normalized.date(), date(2025, 3, 9));
        assert_eq!(normalized.time(), NaiveTime::MIN);
    }

    #[test]
    fn monthly_anchor_on_31st_degrades_to_month_end() {
        let anchor = date(2025, 1, 31);
        assert!(is_monthly_event(date(2025, 2, 28), anchor));
        assert!(!is_monthly_event(date(2025, 2, 27), anchor));
        assert!(is_monthly_event(date(2024, 2, 29), anchor));
        assert!(!is_monthly_event(date(2024, 2, 28), anchor));
        assert!(is_monthly_event(date(2025, 4, 30), anchor));
        assert!(is_monthly_event(date(2025, 5, 31), anchor));
        assert!(!is_monthly_event(date(2025, 5, 30), anchor));
    }

    #[test]
    fn weekday_predicate_skips_weekends() {
        // 2025-10-13 is a Monday.
        let flags: Vec<bool> = (0..7)
            .map(|offset| is_weekday_event(add_days(date(2025, 10, 13), offset)))
            .collect();
        assert_eq!(flags, vec![true, true, true, true, true, false, false]);
    }

    #[test]
    fn event_day_dispatches_on_frequency() {
        let anchor = date(2025, 10, 13);
        let next_week = date(2025, 10, 20);
        let saturday = date(2025, 10, 18);
        assert!(is_event_day(next_week, anchor, EventFrequency::Weekly));
        assert!(is_event_day(next_week, anchor, EventFrequency::Weekday));
        assert!(!is_event_day(next_week, anchor, EventFrequency::Monthly));
        assert!(!is_event_day(saturday, anchor, EventFrequency::Weekday));
        assert!(is_event_day(date(2025, 11, 13), anchor, EventFrequency::Monthly));
    }

    #[test]
    fn day_range_is_inclusive() {
        let days: Vec<_> = day_range(date(2025, 12, 30), date(2026, 1, 2)).collect();
        assert_eq!(
            days,
            vec![
                date(2025, 12, 30),
                date(2025, 12, 31),
                date(2026, 1, 1),
                date(2026, 1, 2)
            ]
        );
        assert_eq!(day_range(date(2025, 1, 2), date(2025, 1, 1)).count(), 0);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_weekly_predicate_has_period_seven(
            anchor_offset in 0i64..40_000,
            weeks in 0i64..600,
            remainder in 1i64..7
        ) {
            let anchor = add_days(date(1970, 1, 1), anchor_offset);
            prop_assert!(is_weekly_event(add_days(anchor, 7 * weeks), anchor));
            prop_assert!(!is_weekly_event(add_days(anchor, 7 * weeks + remainder), anchor));
        }

        #[test]
        fn prop_weekday_predicate_true_five_days_in_any_week(start_offset in 0i64..40_000) {
            let start = add_days(date(1970, 1, 1), start_offset);
            let weekdays = (0..7)
                .filter(|offset| is_weekday_event(add_days(start, *offset)))
                .count();
            prop_assert_eq!(weekdays, 5);
        }

        #[test]
        fn prop_normalize_date_is_idempotent(
            day_offset in 0i64..40_000,
            seconds in 0u32..86_400
        ) {
            let at = add_days(date(1970, 1, 1), day_offset)
                .and_time(NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).expect("valid seconds"));
            let once = normalize_date(at);
            prop_assert_eq!(normalize_date(once), once);
        }

        #[test]
        fn prop_add_months_never_overflows_the_target_month(
            day_offset in 0i64..40_000,
            months in -240i32..240
        ) {
            let start = add_days(date(1970, 1, 1), day_offset);
            let shifted = add_months(start, months);
            let expected_index = start.year() * 12 + start.month0() as i32 + months;
            prop_assert_eq!(shifted.year() * 12 + shifted.month0() as i32, expected_index);
            prop_assert!(shifted.day() <= start.day());
            prop_assert!(shifted.day() == start.day() || shifted.day() == days_in_month(shifted.year(), shifted.month()));
        }

        #[test]
        fn prop_days_between_agrees_with_add_days(
            day_offset in 0i64..40_000,
            delta in -5_000i64..5_000
        ) {
            let start = add_days(date(1970, 1, 1), day_offset);
            prop_assert_eq!(days_between(start, add_days(start, delta)), delta);
        }
    }
}
