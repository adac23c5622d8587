/// Utilities for date and time formatting
///
/// Provides consistent date/time formatting and filter bound parsing across the application
use chrono::{DateTime, NaiveDate, Utc};

/// Format timestamp to DD.MM.YYYY HH:MM:SS format
/// Example: 2024-03-15T14:02:26.123Z -> "15.03.2024 14:02:26"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M:%S").to_string()
}

/// Format timestamp to DD.MM.YYYY format
/// Example: 2024-03-15T14:02:26Z -> "15.03.2024"
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y").to_string()
}

/// Parse a filter date: "YYYY-MM-DD" or a full RFC 3339 timestamp
fn parse_filter_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}

/// Lower bound of a date filter: start of the day (UTC)
pub fn start_of_day(value: &str) -> Option<DateTime<Utc>> {
    parse_filter_date(value)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Upper bound of a date filter, extended to the end of the day (UTC)
pub fn end_of_day(value: &str) -> Option<DateTime<Utc>> {
    parse_filter_date(value)
        .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 999))
        .map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(value: &str) -> DateTime<Utc> {
        value.parse().unwrap()
    }

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime(&ts("2024-03-15T14:02:26.123Z")),
            "15.03.2024 14:02:26"
        );
        assert_eq!(
            format_datetime(&ts("2024-12-31T23:59:59Z")),
            "31.12.2024 23:59:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(&ts("2024-03-15T14:02:26.123Z")), "15.03.2024");
    }

    #[test]
    fn test_day_bounds() {
        assert_eq!(start_of_day("2020-05-01"), Some(ts("2020-05-01T00:00:00Z")));
        assert_eq!(end_of_day("2020-05-01"), Some(ts("2020-05-01T23:59:59.999Z")));
        assert_eq!(end_of_day("2020-05-01T08:00:00Z"), Some(ts("2020-05-01T23:59:59.999Z")));
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(start_of_day(""), None);
        assert_eq!(start_of_day("invalid"), None);
        assert_eq!(end_of_day("2020-13-40"), None);
    }
}
