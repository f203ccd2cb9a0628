//! Conversions between calendar datetimes and the tick and month counts
//! stored in a packed period.
//!
//! All counts are relative to the unix epoch, `1970-01-01T00:00:00Z`. Ticks
//! are 100 nanoseconds.

use crate::unit::TICKS_PER_DAY;
use crate::Error;
use core::fmt::Display;
use log::debug;
use time::{Date, Month, OffsetDateTime, UtcOffset};

const NANOS_PER_TICK: i128 = 100;
const EPOCH_YEAR: i64 = 1970;

/// Human readable rendering of a datetime with tick precision.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    dt: OffsetDateTime,
}

impl Display for DateTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::result::Result<(), std::fmt::Error> {
        let date = self.dt.date();
        let time = self.dt.time();
        let offset = self.dt.offset();
        let (hours, minutes, _) = offset.as_hms();
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:07}{}{:02}:{:02}",
            date.year(),
            date.month() as u8,
            date.day(),
            time.hour(),
            time.minute(),
            time.second(),
            time.nanosecond() / NANOS_PER_TICK as u32,
            if offset.is_negative() { '-' } else { '+' },
            hours.unsigned_abs(),
            minutes.unsigned_abs(),
        )
    }
}

impl From<OffsetDateTime> for DateTime {
    fn from(other: OffsetDateTime) -> Self {
        DateTime { dt: other }
    }
}

/// Returns the number of whole ticks since the epoch, rounding toward
/// negative infinity. The offset of `dt` does not change the result, so
/// non-UTC inputs are normalized here.
pub(crate) fn to_ticks(dt: OffsetDateTime) -> Result<i64, Error> {
    if dt.offset() != UtcOffset::UTC {
        debug!("normalizing start with offset {} to utc", dt.offset());
    }
    let ticks = dt.unix_timestamp_nanos().div_euclid(NANOS_PER_TICK);
    i64::try_from(ticks).map_err(|_| Error::Overflow)
}

pub(crate) fn from_ticks(ticks: i64) -> Result<OffsetDateTime, Error> {
    OffsetDateTime::from_unix_timestamp_nanos(ticks as i128 * NANOS_PER_TICK)
        .map_err(|_| Error::Overflow)
}

/// Inclusive range of tick counts that can be turned back into a datetime.
pub(crate) fn tick_range() -> (i64, i64) {
    let min = Date::MIN.midnight().assume_utc().unix_timestamp_nanos() / NANOS_PER_TICK;
    let max = Date::MAX.midnight().assume_utc().unix_timestamp_nanos() / NANOS_PER_TICK
        + TICKS_PER_DAY as i128
        - 1;
    (
        i64::try_from(min).unwrap_or(i64::MIN),
        i64::try_from(max).unwrap_or(i64::MAX),
    )
}

/// Number of whole months between January 1970 and the month of `date`.
pub(crate) fn month_index(date: Date) -> i64 {
    (date.year() as i64 - EPOCH_YEAR) * 12 + (date.month() as u8 as i64 - 1)
}

/// Inclusive range of month indices that can be turned back into a date.
pub(crate) fn month_range() -> (i64, i64) {
    (month_index(Date::MIN), month_index(Date::MAX))
}

/// Returns midnight UTC on the `anchor` day of the month at `index`. When
/// the month is shorter than `anchor`, the last day of the month is used.
pub(crate) fn month_start(index: i64, anchor: u8) -> Result<OffsetDateTime, Error> {
    let year = i32::try_from(EPOCH_YEAR + index.div_euclid(12)).map_err(|_| Error::Overflow)?;
    let month = Month::try_from(index.rem_euclid(12) as u8 + 1).map_err(|_| Error::Overflow)?;
    let day = anchor.min(month.length(year));

    Date::from_calendar_date(year, month, day)
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| Error::Overflow)
}
