//! Parsing of user supplied dates and the weekday-first rendering used in
//! every response.
//!
//! All dates are treated as UTC. Stored dates are epoch milliseconds.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const WEEKDAYS: &[&str] = &[
    "mon", "tue", "wed", "thu", "fri", "sat", "sun", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday",
];

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Midnight UTC of the current day, used when no date is supplied
pub fn today() -> DateTime<Utc> {
    midnight(Utc::now().date_naive())
}

/// Drops a leading weekday name, which is ignored when parsing. This lets the
/// rendered form ("Sun Jan 01 2023") parse back in.
fn strip_weekday(value: &str) -> &str {
    match value.split_once(' ') {
        Some((first, rest)) => {
            let first = first.trim_end_matches(',').to_ascii_lowercase();
            if WEEKDAYS.contains(&first.as_str()) {
                rest.trim_start()
            } else {
                value
            }
        }
        None => value,
    }
}

/// Parses a date as supplied by a client.
///
/// Accepts RFC 3339 / ISO 8601 date-times, plain `YYYY-MM-DD` dates, partial
/// `YYYY-MM` and `YYYY` dates, RFC 2822 and a handful of written forms such as
/// `January 1, 2023`. Returns `None` for anything that isn't a real calendar
/// date, e.g. `2023-02-30`.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(d) = DateTime::parse_from_rfc3339(value) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(d) = DateTime::parse_from_rfc2822(value) {
        return Some(d.with_timezone(&Utc));
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(d) = NaiveDateTime::parse_from_str(value, format) {
            return Some(d.and_utc());
        }
    }

    let without_weekday = strip_weekday(value);
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(without_weekday, format) {
            return Some(midnight(d));
        }
    }

    // YYYY-MM and YYYY
    let digits_only = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    match value.split_once('-') {
        Some((year, month)) if year.len() == 4 && digits_only(year) && digits_only(month) => {
            let date = NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)?;
            Some(midnight(date))
        }
        None if value.len() == 4 && digits_only(value) => {
            let date = NaiveDate::from_ymd_opt(value.parse().ok()?, 1, 1)?;
            Some(midnight(date))
        }
        _ => None,
    }
}

pub fn from_epoch_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// `Sun, 01 Jan 2023 00:00:00 GMT`
pub fn utc_string(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Rearranges a [`utc_string`] into `Sun Jan 01 2023`, dropping the time and
/// zone
pub fn rearrange_utc_string(utc: &str) -> Option<String> {
    let (weekday, rest) = utc.split_once(", ")?;
    let mut parts = rest.split(' ');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    Some(format!("{weekday} {month} {day} {year}"))
}

/// Renders a date the way every response does, e.g. `Sun Jan 01 2023`
pub fn format_date(date: &DateTime<Utc>) -> String {
    let utc = utc_string(date);
    rearrange_utc_string(&utc).unwrap_or(utc)
}

/// Renders stored epoch milliseconds, see [`format_date`]
pub fn format_epoch_millis(millis: i64) -> Option<String> {
    from_epoch_millis(millis).map(|d| format_date(&d))
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_date("2023-01-01"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse_date(" 2023-01-31 "), Some(ymd(2023, 1, 31)));
    }

    #[test]
    fn test_parse_date_time() {
        assert_eq!(
            parse_date("2023-01-01T10:30:00Z"),
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(
            parse_date("2023-01-01T10:30"),
            Some(Utc.with_ymd_and_hms(2023, 1, 1, 10, 30, 0).unwrap())
        );
        assert_eq!(parse_date("Sun, 01 Jan 2023 00:00:00 GMT"), Some(ymd(2023, 1, 1)));
    }

    #[test]
    fn test_parse_written_dates() {
        assert_eq!(parse_date("January 1, 2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse_date("Sun Jan 01 2023"), Some(ymd(2023, 1, 1)));
        // Weekday is ignored, like the rest of the world does
        assert_eq!(parse_date("Mon Jan 01 2023"), Some(ymd(2023, 1, 1)));
        assert_eq!(parse_date("2023-03"), Some(ymd(2023, 3, 1)));
        assert_eq!(parse_date("2023"), Some(ymd(2023, 1, 1)));
    }

    #[test]
    fn test_parse_rejects_invalid_dates() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date("2023-02-30"), None);
        assert_eq!(parse_date("2023-13"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&ymd(2023, 1, 1)), "Sun Jan 01 2023");
        assert_eq!(format_date(&ymd(1990, 1, 1)), "Mon Jan 01 1990");
        let late = Utc.with_ymd_and_hms(2023, 1, 31, 23, 59, 59).unwrap();
        assert_eq!(format_date(&late), "Tue Jan 31 2023");
    }

    #[test]
    fn test_rearrange_utc_string() {
        assert_eq!(
            rearrange_utc_string("Wed, 15 Mar 2023 08:00:00 GMT").as_deref(),
            Some("Wed Mar 15 2023")
        );
        assert_eq!(rearrange_utc_string("garbage"), None);
    }

    #[test]
    fn test_epoch_millis_round_trip() {
        let date = ymd(2023, 1, 1);
        assert_eq!(date.timestamp_millis(), 1_672_531_200_000);
        assert_eq!(format_epoch_millis(1_672_531_200_000).as_deref(), Some("Sun Jan 01 2023"));
    }
}
