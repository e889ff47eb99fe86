//! Partial timestamps anchored to a known instant

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use thiserror::Error;

/// A partial timestamp which cannot be placed on the calendar
#[derive(Error, Clone, Debug, PartialEq, Eq, Hash)]
#[error("day/time fields are not valid near the anchor time")]
pub struct InvalidDateErr {}

/// Parse a `DDHHMM` field into (`day`, `hour`, `minute`)
///
/// Only the shape and the field ranges are checked. Whether the
/// day exists in a given month is decided by
/// [`resolve_day_time()`].
pub(crate) fn parse_day_time(field: &str) -> Option<(u32, u32, u32)> {
    if field.len() != 6 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day: u32 = field[0..2].parse().ok()?;
    let hour: u32 = field[2..4].parse().ok()?;
    let minute: u32 = field[4..6].parse().ok()?;
    if day == 0 || day > 31 || hour > 23 || minute > 59 {
        return None;
    }

    Some((day, hour, minute))
}

/// Parse an `HHMM` field into (`hour`, `minute`)
pub(crate) fn parse_hour_minute(field: &str) -> Option<(u32, u32)> {
    if field.len() != 4 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = field[0..2].parse().ok()?;
    let minute: u32 = field[2..4].parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }

    Some((hour, minute))
}

/// Place a day-of-month timestamp on the calendar
///
/// Many NWS encodings carry only the day of the month, the hour,
/// and the minute. The year and month are implied by some nearby
/// `anchor` time, usually the product issuance time.
///
/// If the day is at least half a month *before* the anchor day,
/// the timestamp is assumed to fall in the following month. If it
/// is at least half a month *after*, it is assumed to fall in the
/// previous month. Otherwise it falls in the anchor's month.
///
/// The returned datetime has its seconds field set to zero.
pub fn resolve_day_time(
    fields: (u32, u32, u32),
    anchor: &DateTime<Utc>,
) -> Result<DateTime<Utc>, InvalidDateErr> {
    let (day, hour, minute) = fields;

    let daydiff = anchor.day() as i32 - day as i32;
    let first_of_month =
        NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1).ok_or(InvalidDateErr {})?;
    let first_of_month = if daydiff >= 15 {
        // end of the month has passed
        first_of_month.checked_add_months(Months::new(1))
    } else if daydiff <= -15 {
        // refers to last month
        first_of_month.checked_sub_months(Months::new(1))
    } else {
        Some(first_of_month)
    }
    .ok_or(InvalidDateErr {})?;

    let naive = first_of_month
        .with_day(day)
        .ok_or(InvalidDateErr {})?
        .and_hms_opt(hour, minute, 0)
        .ok_or(InvalidDateErr {})?;

    Ok(Utc.from_utc_datetime(&naive))
}

/// Place an hour-and-minute timestamp on the calendar
///
/// The timestamp is assumed to lie within twelve hours of the
/// `anchor`. Observation times which fall just before midnight
/// UTC are thus placed on the anchor's previous day.
pub fn resolve_hour_minute(
    fields: (u32, u32),
    anchor: &DateTime<Utc>,
) -> Result<DateTime<Utc>, InvalidDateErr> {
    let (hour, minute) = fields;

    let naive = anchor
        .date_naive()
        .and_hms_opt(hour, minute, 0)
        .ok_or(InvalidDateErr {})?;
    let candidate = Utc.from_utc_datetime(&naive);

    let half_day = Duration::hours(12);
    if candidate - *anchor > half_day {
        Ok(candidate - Duration::days(1))
    } else if *anchor - candidate > half_day {
        Ok(candidate + Duration::days(1))
    } else {
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_day_time() {
        assert_eq!(Some((3, 12, 0)), parse_day_time("031200"));
        assert_eq!(Some((31, 23, 59)), parse_day_time("312359"));
        assert_eq!(None, parse_day_time("001200"));
        assert_eq!(None, parse_day_time("032400"));
        assert_eq!(None, parse_day_time("03120"));
        assert_eq!(None, parse_day_time("0312OO"));

        assert_eq!(Some((22, 54)), parse_hour_minute("2254"));
        assert_eq!(None, parse_hour_minute("2460"));
    }

    #[test]
    fn test_resolve_day_time() {
        let anchor = Utc.with_ymd_and_hms(2011, 12, 3, 9, 30, 0).unwrap();

        // same day
        let d = resolve_day_time((3, 12, 0), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2011, 12, 3, 12, 0, 0).unwrap());

        // expires tomorrow
        let d = resolve_day_time((4, 0, 15), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2011, 12, 4, 0, 15, 0).unwrap());

        // refers to the end of last month
        let d = resolve_day_time((30, 23, 0), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2011, 11, 30, 23, 0, 0).unwrap());

        // bumps to next month, and next year
        let anchor = Utc.with_ymd_and_hms(2011, 12, 31, 22, 0, 0).unwrap();
        let d = resolve_day_time((1, 4, 0), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2012, 1, 1, 4, 0, 0).unwrap());

        // there is no 31 November
        let anchor = Utc.with_ymd_and_hms(2011, 11, 30, 22, 0, 0).unwrap();
        resolve_day_time((31, 4, 0), &anchor).expect_err("should not succeed");
    }

    #[test]
    fn test_resolve_hour_minute() {
        let anchor = Utc.with_ymd_and_hms(2024, 6, 10, 23, 0, 0).unwrap();
        let d = resolve_hour_minute((22, 54), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2024, 6, 10, 22, 54, 0).unwrap());

        // observation just before midnight, issued just after
        let anchor = Utc.with_ymd_and_hms(2024, 6, 11, 0, 5, 0).unwrap();
        let d = resolve_hour_minute((23, 58), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2024, 6, 10, 23, 58, 0).unwrap());

        // and the reverse
        let anchor = Utc.with_ymd_and_hms(2024, 6, 10, 23, 55, 0).unwrap();
        let d = resolve_hour_minute((0, 10), &anchor).unwrap();
        assert_eq!(d, Utc.with_ymd_and_hms(2024, 6, 11, 0, 10, 0).unwrap());
    }
}
