//! 时间工具函数 (report timezone conversion)
//!
//! "Local" always means the report timezone, never the host clock.
//! All helpers are pure; the current time is never consulted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{AppError, AppResult};

/// Calendar day key used by the daily series and date filters
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an IANA timezone name (e.g. `Europe/Warsaw`)
pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::config(format!("Unknown timezone: {}", name)))
}

/// 解析 cutoff 时间字符串 (HH:MM)，失败返回 00:00
pub fn parse_cutoff(cutoff: &str) -> NaiveTime {
    NaiveTime::parse_from_str(cutoff.trim(), "%H:%M").unwrap_or_else(|e| {
        tracing::warn!(
            "Failed to parse business_day_cutoff '{}': {}, falling back to 00:00",
            cutoff,
            e
        );
        NaiveTime::MIN
    })
}

/// Naive local date-time → instant in the report timezone
///
/// DST gap fallback: a local time that does not exist is read as UTC.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    naive
        .and_local_timezone(tz)
        .latest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Unix millis → instant in the report timezone
pub fn from_millis(millis: i64, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::<Utc>::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&tz))
}

/// Business date of a local date-time
///
/// Local time before `cutoff` still belongs to the previous business day.
/// With a `00:00` cutoff this is the plain calendar date. At the very
/// start of the representable range the calendar date is kept.
pub fn business_date(local: NaiveDateTime, cutoff: NaiveTime) -> NaiveDate {
    let shift = cutoff.signed_duration_since(NaiveTime::MIN);
    local
        .checked_sub_signed(shift)
        .map(|shifted| shifted.date())
        .unwrap_or_else(|| local.date())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-03-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert!(parse_date("31.03.2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_parse_cutoff_fallback() {
        assert_eq!(parse_cutoff("02:00"), NaiveTime::from_hms_opt(2, 0, 0).unwrap());
        assert_eq!(parse_cutoff("late"), NaiveTime::MIN);
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Warsaw").unwrap(), chrono_tz::Europe::Warsaw);
        assert!(parse_timezone("Mars/Olympus").is_err());
    }

    #[test]
    fn test_business_date_default_cutoff_is_calendar_date() {
        let local = dt("2024-05-10 23:59:59");
        assert_eq!(business_date(local, NaiveTime::MIN), local.date());
        let local = dt("2024-05-11 00:00:00");
        assert_eq!(business_date(local, NaiveTime::MIN), local.date());
    }

    #[test]
    fn test_business_date_with_cutoff() {
        let cutoff = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(
            business_date(dt("2024-05-11 01:30:00"), cutoff),
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
        assert_eq!(
            business_date(dt("2024-05-11 02:00:00"), cutoff),
            NaiveDate::from_ymd_opt(2024, 5, 11).unwrap()
        );
    }

    #[test]
    fn test_business_date_at_range_minimum() {
        let cutoff = NaiveTime::from_hms_opt(2, 0, 0).unwrap();
        assert_eq!(business_date(NaiveDateTime::MIN, cutoff), NaiveDate::MIN);
    }

    #[test]
    fn test_localize_dst_gap_falls_back() {
        // 2024-03-31 02:30 does not exist in Europe/Warsaw
        let local = localize(dt("2024-03-31 02:30:00"), chrono_tz::Europe::Warsaw);
        assert_eq!(local.naive_utc(), dt("2024-03-31 02:30:00"));
        let regular = localize(dt("2024-06-01 12:00:00"), chrono_tz::Europe::Warsaw);
        assert_eq!(regular.hour(), 12);
    }

    #[test]
    fn test_from_millis() {
        let local = from_millis(0, chrono_tz::UTC).unwrap();
        assert_eq!(local.naive_local(), dt("1970-01-01 00:00:00"));
    }
}
