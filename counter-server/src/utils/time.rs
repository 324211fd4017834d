//! Business-day time helpers
//!
//! Token numbering and dashboard buckets reset at midnight in the
//! configured business timezone, not UTC.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

/// Key identifying the business day containing `now_millis`, e.g. "2026-08-21"
pub fn day_key(now_millis: i64, tz: Tz) -> String {
    let utc = DateTime::from_timestamp_millis(now_millis).unwrap_or_default();
    utc.with_timezone(&tz).format("%Y-%m-%d").to_string()
}

/// Unix millis of local midnight at the start of the business day
/// containing `now_millis`
pub fn day_start_millis(now_millis: i64, tz: Tz) -> i64 {
    let utc = DateTime::from_timestamp_millis(now_millis).unwrap_or_default();
    let midnight = utc.with_timezone(&tz).date_naive().and_time(NaiveTime::MIN);
    // earliest() picks the first wall-clock occurrence on DST-fold days
    midnight
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(now_millis)
}

/// Inclusive unix-millis bounds [start, end] of the business day named by
/// a "YYYY-MM-DD" string, for created_at range filters. `None` when the
/// string is not a calendar date.
pub fn day_bounds(date: &str, tz: Tz) -> Option<(i64, i64)> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let start = day.and_time(NaiveTime::MIN).and_local_timezone(tz).earliest()?;
    let next = day
        .succ_opt()?
        .and_time(NaiveTime::MIN)
        .and_local_timezone(tz)
        .earliest()?;
    Some((start.timestamp_millis(), next.timestamp_millis() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Asia::Kolkata;
    use chrono_tz::UTC;

    // 2026-01-15T20:00:00Z
    const EVENING_UTC: i64 = 1_768_507_200_000;

    #[test]
    fn test_day_key_respects_timezone() {
        // 20:00 UTC is already past midnight in Kolkata (UTC+5:30)
        assert_eq!(day_key(EVENING_UTC, UTC), "2026-01-15");
        assert_eq!(day_key(EVENING_UTC, Kolkata), "2026-01-16");
    }

    #[test]
    fn test_day_start_is_local_midnight() {
        let start = day_start_millis(EVENING_UTC, Kolkata);
        // Kolkata midnight on Jan 16 = 18:30 UTC on Jan 15
        assert_eq!(day_key(start, Kolkata), "2026-01-16");
        assert_eq!(start % 1000, 0);
        assert!(start <= EVENING_UTC);
        // Same instant re-bucketed lands on the same day start
        assert_eq!(day_start_millis(start, Kolkata), start);
    }

    #[test]
    fn test_consecutive_days_differ() {
        let one_day = 24 * 60 * 60 * 1000;
        assert_ne!(
            day_key(EVENING_UTC, Kolkata),
            day_key(EVENING_UTC + one_day, Kolkata)
        );
    }

    #[test]
    fn test_day_bounds_cover_exactly_one_day() {
        let (start, end) = day_bounds("2026-01-16", Kolkata).unwrap();
        assert_eq!(day_key(start, Kolkata), "2026-01-16");
        assert_eq!(day_key(end, Kolkata), "2026-01-16");
        assert_eq!(day_key(end + 1, Kolkata), "2026-01-17");
        assert_eq!(start, day_start_millis(EVENING_UTC, Kolkata));
    }

    #[test]
    fn test_day_bounds_reject_garbage() {
        assert!(day_bounds("not-a-date", Kolkata).is_none());
        assert!(day_bounds("2026-13-40", Kolkata).is_none());
        assert!(day_bounds("", Kolkata).is_none());
    }
}
