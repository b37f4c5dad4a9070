//! The `dd/MM/yyyy HH:mm:ss` wire date format and calendar-month helpers.
//!
//! Timestamps are stored as `TIMESTAMPTZ`; the legacy string format survives only
//! on the wire, always interpreted as UTC.

use time::{
    format_description::FormatItem, macros::format_description, Date, Month, OffsetDateTime,
    PrimitiveDateTime, Time,
};

use crate::error::ServiceError;

const WIRE: &[FormatItem<'_>] =
    format_description!("[day]/[month]/[year] [hour]:[minute]:[second]");

pub fn format_wire(ts: OffsetDateTime) -> String {
    ts.format(&WIRE)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}

pub fn parse_wire(s: &str) -> Result<OffsetDateTime, ServiceError> {
    PrimitiveDateTime::parse(s.trim(), &WIRE)
        .map(|dt| dt.assume_utc())
        .map_err(|_| {
            ServiceError::validation(format!(
                "invalid date \"{s}\": expected dd/MM/yyyy HH:mm:ss"
            ))
        })
}

/// Half-open `[start, end)` bounds of the calendar month containing `ts`.
pub fn month_bounds(ts: OffsetDateTime) -> (OffsetDateTime, OffsetDateTime) {
    let start = Date::from_calendar_date(ts.year(), ts.month(), 1)
        .expect("first of month is always valid");
    let end = match ts.month() {
        Month::December => Date::from_calendar_date(ts.year() + 1, Month::January, 1),
        m => Date::from_calendar_date(ts.year(), m.next(), 1),
    }
    .expect("first of month is always valid");
    (
        PrimitiveDateTime::new(start, Time::MIDNIGHT).assume_utc(),
        PrimitiveDateTime::new(end, Time::MIDNIGHT).assume_utc(),
    )
}

pub fn same_month(a: OffsetDateTime, b: OffsetDateTime) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn wire_format_round_trips() {
        let ts = datetime!(2025-03-07 09:05:00 UTC);
        let s = format_wire(ts);
        assert_eq!(s, "07/03/2025 09:05:00");
        assert_eq!(parse_wire(&s).unwrap(), ts);
    }

    #[test]
    fn parse_rejects_other_formats() {
        assert!(parse_wire("2025-03-07 09:05:00").is_err());
        assert!(parse_wire("07/03/2025").is_err());
        assert!(parse_wire("").is_err());
    }

    #[test]
    fn month_bounds_cover_the_month() {
        let (start, end) = month_bounds(datetime!(2025-03-15 12:00:00 UTC));
        assert_eq!(start, datetime!(2025-03-01 00:00:00 UTC));
        assert_eq!(end, datetime!(2025-04-01 00:00:00 UTC));
    }

    #[test]
    fn month_bounds_handle_december() {
        let (start, end) = month_bounds(datetime!(2024-12-31 23:59:59 UTC));
        assert_eq!(start, datetime!(2024-12-01 00:00:00 UTC));
        assert_eq!(end, datetime!(2025-01-01 00:00:00 UTC));
    }

    #[test]
    fn same_month_compares_year_and_month() {
        assert!(same_month(
            datetime!(2025-01-01 00:00:00 UTC),
            datetime!(2025-01-31 23:59:59 UTC)
        ));
        // January of different years is a new month
        assert!(!same_month(
            datetime!(2024-01-15 00:00:00 UTC),
            datetime!(2025-01-15 00:00:00 UTC)
        ));
    }
}
