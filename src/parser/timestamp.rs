//! NMEA time and date reconstruction
//!
//! GPRMC carries the time of day as `HHMMSS` and the date as `DDMMYY`.
//! Receivers without a date yet leave the field empty, in which case the
//! date comes from a [`Clock`].

use chrono::{DateTime, Datelike, Months, NaiveDate, TimeDelta, Utc};

/// Source of the current date for sentences that lack one
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Current UTC date from the system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Two-digit years at or above this belong to the 1900s, the rest to the 2000s
const CENTURY_PIVOT: i64 = 80;

fn expand_year(two_digit: i64) -> i64 {
    if two_digit >= CENTURY_PIVOT {
        1900 + two_digit
    } else {
        2000 + two_digit
    }
}

/// Build a UTC timestamp from a `HHMMSS` time and a `DDMMYY` date
///
/// A date field shorter than six characters falls back to `clock`. Years
/// 80-99 are read as 1980-1999 and 00-79 as 2000-2079. Each
/// numeric subfield that fails to parse counts as zero, and out-of-range
/// calendar values roll over into neighbouring units (month 0 is December
/// of the previous year), so this always returns a timestamp.
pub fn decode_timestamp<C: Clock + ?Sized>(
    time_field: &str,
    date_field: &str,
    clock: &C,
) -> DateTime<Utc> {
    let (year, month, day) = if date_field.len() > 5 {
        (
            expand_year(two_digits(date_field, 4)),
            two_digits(date_field, 2),
            two_digits(date_field, 0),
        )
    } else {
        let today = clock.today();
        (
            today.year() as i64,
            today.month() as i64,
            today.day() as i64,
        )
    };

    let hour = two_digits(time_field, 0);
    let minute = two_digits(time_field, 2);
    let second = two_digits(time_field, 4);

    normalized_utc(year, month, day, hour * 3600 + minute * 60 + second)
}

/// Parse the two characters at `start`, zero when missing or not numeric
fn two_digits(field: &str, start: usize) -> i64 {
    field
        .get(start..start + 2)
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

fn normalized_utc(year: i64, month: i64, day: i64, seconds: i64) -> DateTime<Utc> {
    let months_from_january = month - 1;

    i32::try_from(year)
        .ok()
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
        .and_then(|january| {
            let shift = Months::new(months_from_january.unsigned_abs() as u32);
            if months_from_january >= 0 {
                january.checked_add_months(shift)
            } else {
                january.checked_sub_months(shift)
            }
        })
        .and_then(|first| first.checked_add_signed(TimeDelta::try_days(day - 1)?))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .and_then(|midnight| midnight.checked_add_signed(TimeDelta::try_seconds(seconds)?))
        .map(|datetime| datetime.and_utc())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 16).unwrap())
    }

    #[test]
    fn test_time_and_date() {
        let ts = decode_timestamp("123519", "230394", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(1994, 3, 23, 12, 35, 19).unwrap());
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(expand_year(0), 2000);
        assert_eq!(expand_year(26), 2026);
        assert_eq!(expand_year(79), 2079);
        assert_eq!(expand_year(80), 1980);
        assert_eq!(expand_year(99), 1999);
    }

    #[test]
    fn test_missing_date_uses_clock() {
        let ts = decode_timestamp("123519", "", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 10, 16, 12, 35, 19).unwrap());
    }

    #[test]
    fn test_short_date_uses_clock() {
        let ts = decode_timestamp("000001", "23039", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 1).unwrap());
    }

    #[test]
    fn test_fractional_seconds_are_dropped() {
        let ts = decode_timestamp("123519.75", "010125", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 1, 1, 12, 35, 19).unwrap());
        assert_eq!(ts.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_unparsable_subfields_count_as_zero() {
        // Month "xx" becomes 0, which rolls back to December of 2023
        let ts = decode_timestamp("12ab19", "15xx24", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 12, 15, 12, 0, 19).unwrap());
    }

    #[test]
    fn test_empty_time_is_midnight() {
        let ts = decode_timestamp("", "230324", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 23, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_overflowing_fields_roll_over() {
        // 31 February 2024 is 2 March; 25:61:61 is the next day 02:02:01
        let ts = decode_timestamp("256161", "310224", &clock());
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 3, 3, 2, 2, 1).unwrap());
    }
}
