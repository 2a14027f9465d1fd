//! This module contains the pure, stateless scalar kernels behind the
//! `days`, `months`, `years` and `hours` partition transforms.
//!
//! All arithmetic here is epoch-relative and signed: instants before
//! 1970-01-01 produce negative bucket numbers, and day/month/year bucketing
//! rounds toward negative infinity so that an instant strictly before a
//! boundary belongs to the prior bucket. The single deliberate exception is
//! the hour kernel, which truncates toward zero — see `hour_of_micros`.
//! This module is panic-free and knows nothing about the columnar container
//! beyond its `TimeUnit` tag.

use chrono::{Datelike, FixedOffset, NaiveDate};

use crate::error::FloeError;

//==================================================================================
// 1. Constants
//==================================================================================

pub const MICROS_PER_MILLI: i64 = 1_000;
pub const MICROS_PER_SECOND: i64 = 1_000_000;
pub const MICROS_PER_HOUR: i64 = 3_600_000_000;
pub const MICROS_PER_DAY: i64 = 86_400_000_000;

/// 1970-01-01 in chrono's days-from-CE reckoning (0001-01-01 is day 1).
const EPOCH_DAYS_FROM_CE: i64 = 719_163;

//==================================================================================
// 2. Instant Normalization
//==================================================================================

/// Normalizes a raw timestamp value in `unit` ticks to microseconds since
/// the epoch.
///
/// Seconds and milliseconds widen with checked multiplication; a value whose
/// microsecond form exceeds `i64` surfaces `Overflow`. Nanoseconds narrow
/// with floor division, consistent with the floor semantics of every other
/// temporal conversion in this module.
pub fn instant_micros(value: i64, unit: arrow::datatypes::TimeUnit) -> Result<i64, FloeError> {
    use arrow::datatypes::TimeUnit;
    match unit {
        TimeUnit::Second => value.checked_mul(MICROS_PER_SECOND),
        TimeUnit::Millisecond => value.checked_mul(MICROS_PER_MILLI),
        TimeUnit::Microsecond => Some(value),
        TimeUnit::Nanosecond => Some(value.div_euclid(1_000)),
    }
    .ok_or_else(|| {
        FloeError::Overflow(format!(
            "timestamp value {} in {:?} does not fit in microseconds",
            value, unit
        ))
    })
}

/// Parses a fixed UTC offset string (`"+HH:MM"` / `"-HH:MM"`) into its
/// signed microsecond displacement from UTC.
///
/// Named timezones carry daylight rules this crate has no business
/// interpreting; anything that is not a fixed offset is rejected.
pub fn parse_utc_offset(offset: &str) -> Result<i64, FloeError> {
    offset
        .parse::<FixedOffset>()
        .map(|parsed| i64::from(parsed.local_minus_utc()) * MICROS_PER_SECOND)
        .map_err(|_| {
            FloeError::UnsupportedType(format!(
                "timestamp offset {:?} is not a fixed UTC offset of the form \"+HH:MM\"",
                offset
            ))
        })
}

/// Shifts a UTC instant by a fixed offset to obtain the local wall-clock
/// instant used for calendar bucketing.
pub fn to_local(utc_micros: i64, offset_micros: i64) -> Result<i64, FloeError> {
    utc_micros.checked_add(offset_micros).ok_or_else(|| {
        FloeError::Overflow(format!(
            "shifting instant {}us by offset {}us leaves the i64 range",
            utc_micros, offset_micros
        ))
    })
}

//==================================================================================
// 3. Bucket Kernels
//==================================================================================

/// Floor division of a local instant into whole days since 1970-01-01.
///
/// `-1us` is day `-1` (1969-12-31), not day `0`.
pub fn day_of_micros(local_micros: i64) -> i64 {
    local_micros.div_euclid(MICROS_PER_DAY)
}

/// Resolves a day count to a proleptic-Gregorian calendar date.
fn civil_of_day(day: i64) -> Result<NaiveDate, FloeError> {
    day.checked_add(EPOCH_DAYS_FROM_CE)
        .and_then(|ce| i32::try_from(ce).ok())
        .and_then(NaiveDate::from_num_days_from_ce_opt)
        .ok_or_else(|| {
            FloeError::Overflow(format!("day offset {} is outside the calendar range", day))
        })
}

/// Months-since-epoch bucket of a day count, using true variable-length
/// calendar month boundaries (leap years included).
pub fn month_of_day(day: i64) -> Result<i32, FloeError> {
    let date = civil_of_day(day)?;
    Ok((date.year() - 1970) * 12 + date.month0() as i32)
}

/// Years-since-epoch bucket of a day count, independent of month and day
/// within the year.
pub fn year_of_day(day: i64) -> Result<i32, FloeError> {
    Ok(civil_of_day(day)?.year() - 1970)
}

/// Hours-since-epoch bucket of a local instant.
///
/// Divides truncating TOWARD ZERO, so `-1us` buckets to hour `0` while
/// `day_of_micros(-1)` buckets to day `-1`. The asymmetry with the floor
/// semantics of days/months/years is reproduced from the observed behavior
/// and test vectors of the reference implementation; consumers depend on it,
/// so it must not be normalized to floor.
pub fn hour_of_micros(local_micros: i64) -> Result<i32, FloeError> {
    i32::try_from(local_micros / MICROS_PER_HOUR).map_err(|_| {
        FloeError::Overflow(format!(
            "hour offset of instant {}us does not fit in i32",
            local_micros
        ))
    })
}

//==================================================================================
// 4. Unit Tests
//==================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::TimeUnit;

    #[test]
    fn test_instant_micros_all_units() {
        assert_eq!(instant_micros(1512151975, TimeUnit::Second).unwrap(), 1512151975000000);
        assert_eq!(instant_micros(1512151975038, TimeUnit::Millisecond).unwrap(), 1512151975038000);
        assert_eq!(instant_micros(1512151975038194, TimeUnit::Microsecond).unwrap(), 1512151975038194);
        assert_eq!(instant_micros(1512151975038194111, TimeUnit::Nanosecond).unwrap(), 1512151975038194);
    }

    #[test]
    fn test_instant_micros_nanos_floor_before_epoch() {
        // -1ns is inside the microsecond ending at the epoch boundary.
        assert_eq!(instant_micros(-1, TimeUnit::Nanosecond).unwrap(), -1);
        assert_eq!(instant_micros(-1000, TimeUnit::Nanosecond).unwrap(), -1);
        assert_eq!(instant_micros(-1001, TimeUnit::Nanosecond).unwrap(), -2);
    }

    #[test]
    fn test_instant_micros_second_overflow() {
        let result = instant_micros(i64::MAX / 2, TimeUnit::Second);
        assert!(matches!(result, Err(FloeError::Overflow(_))));
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+00:00").unwrap(), 0);
        assert_eq!(parse_utc_offset("-08:00").unwrap(), -8 * MICROS_PER_HOUR);
        assert_eq!(parse_utc_offset("+05:30").unwrap(), 5 * MICROS_PER_HOUR + 30 * 60 * MICROS_PER_SECOND);
    }

    #[test]
    fn test_parse_named_timezone_is_rejected() {
        for tz in ["America/New_York", "UTC"] {
            assert!(matches!(
                parse_utc_offset(tz),
                Err(FloeError::UnsupportedType(_))
            ));
        }
    }

    #[test]
    fn test_day_of_micros_floors() {
        assert_eq!(day_of_micros(0), 0);
        assert_eq!(day_of_micros(MICROS_PER_DAY - 1), 0);
        assert_eq!(day_of_micros(MICROS_PER_DAY), 1);
        assert_eq!(day_of_micros(-1), -1);
        assert_eq!(day_of_micros(-MICROS_PER_DAY), -1);
        assert_eq!(day_of_micros(-MICROS_PER_DAY - 1), -2);
    }

    #[test]
    fn test_month_of_day() {
        assert_eq!(month_of_day(0).unwrap(), 0);
        assert_eq!(month_of_day(-1).unwrap(), -1); // 1969-12-31
        assert_eq!(month_of_day(-13).unwrap(), -1); // 1969-12-19
        assert_eq!(month_of_day(-32).unwrap(), -2); // 1969-11-30
        assert_eq!(month_of_day(17501).unwrap(), 575); // 2017-12-01
        assert_eq!(month_of_day(31).unwrap(), 1); // 1970-02-01
    }

    #[test]
    fn test_year_of_day_uses_calendar_years() {
        assert_eq!(year_of_day(0).unwrap(), 0);
        assert_eq!(year_of_day(364).unwrap(), 0); // 1970-12-31
        assert_eq!(year_of_day(366).unwrap(), 1); // 1971-01-02
        assert_eq!(year_of_day(-1).unwrap(), -1); // 1969-12-31
        assert_eq!(year_of_day(-364).unwrap(), -1); // 1969-01-02
        assert_eq!(year_of_day(-366).unwrap(), -2); // 1968-12-31
    }

    #[test]
    fn test_month_of_day_overflow() {
        let result = month_of_day(i64::MAX / 2);
        assert!(matches!(result, Err(FloeError::Overflow(_))));
    }

    #[test]
    fn test_hour_of_micros_truncates_toward_zero() {
        assert_eq!(hour_of_micros(-1).unwrap(), 0);
        assert_eq!(hour_of_micros(-MICROS_PER_HOUR + 1).unwrap(), 0);
        assert_eq!(hour_of_micros(-MICROS_PER_HOUR).unwrap(), -1);
        assert_eq!(hour_of_micros(MICROS_PER_HOUR - 1).unwrap(), 0);
        assert_eq!(hour_of_micros(MICROS_PER_HOUR + 1).unwrap(), 1);
        assert_eq!(hour_of_micros(1512151975038194).unwrap(), 420042);
    }
}
