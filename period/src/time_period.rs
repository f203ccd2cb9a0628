use crate::datetime::{from_ticks, month_index, month_range, month_start, tick_range, to_ticks};
use crate::unit::{ANCHOR_BITS, ANCHOR_MASK, UNIT_MASK};
use crate::{Error, Period, UnitPeriod};
use core::any::Any;
use core::cmp::Ordering;
use core::fmt::Display;
use core::str::FromStr;
use log::{debug, trace};
use time::OffsetDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A period packed into a single `i64`.
///
/// The start offset occupies the most significant bits, so comparing the raw
/// integers orders periods of the same unit and length by their start. See
/// [`crate::unit`] for the layout.
///
/// Any `i64` is a `TimePeriod`, but not every `TimePeriod` decodes. Use
/// [`Period`] for a value which is known to be valid.
///
/// The size of a `TimePeriod` is always the same as an `i64`.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TimePeriod {
    pub(crate) value: i64,
}

impl TimePeriod {
    pub const fn from_raw(value: i64) -> Self {
        Self { value }
    }

    pub const fn as_raw(&self) -> i64 {
        self.value
    }

    /// Pack a unit, a length, and a start into a `TimePeriod`.
    ///
    /// Starts with a non-UTC offset are normalized to UTC. For units with a
    /// fixed length the start is truncated down to the nearest unit boundary
    /// relative to the unix epoch. Month periods start at midnight UTC and
    /// remember their day of month, see [`Period::add`]. Eternity keeps the
    /// start at tick resolution.
    pub fn encode(unit: UnitPeriod, length: u32, start: OffsetDateTime) -> Result<Self, Error> {
        if length == 0 {
            debug!("rejecting {unit} period with zero length");
            return Err(Error::NonPositiveLength);
        }

        let ticks = to_ticks(start)?;

        let offset = match unit {
            UnitPeriod::Tick | UnitPeriod::Eternity => ticks,
            UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day => {
                let factor = unit.ticks().ok_or(Error::InvalidUnit(unit.ordinal()))?;
                if ticks.rem_euclid(factor) != 0 {
                    trace!("truncating start to {unit} boundary");
                }
                ticks.div_euclid(factor)
            }
            UnitPeriod::Month => {
                let date = from_ticks(ticks)?.date();
                month_offset(month_index(date), date.day())?
            }
        };

        Self::pack(unit, length, offset)
    }

    /// Combine the fields, checking that each one fits its place in the
    /// layout and that the start can be decoded again.
    pub(crate) fn pack(unit: UnitPeriod, length: u32, offset: i64) -> Result<Self, Error> {
        if length == 0 {
            return Err(Error::NonPositiveLength);
        }

        if length > unit.max_length() {
            debug!("{unit} period length {length} exceeds {}", unit.max_length());
            return Err(Error::Overflow);
        }

        if !in_range(unit, offset) {
            debug!("{unit} period start offset {offset} is out of range");
            return Err(Error::Overflow);
        }

        let value = (offset << unit.start_shift())
            | ((length as i64 - 1) << crate::unit::UNIT_BITS)
            | unit.code();

        Ok(Self { value })
    }

    /// Returns the unit without decoding the rest of the value.
    pub fn unit(&self) -> Result<UnitPeriod, Error> {
        UnitPeriod::from_code(self.value & UNIT_MASK)
    }

    /// Returns the length multiplier without decoding the start.
    pub fn length(&self) -> Result<u32, Error> {
        let unit = self.unit()?;
        Ok(self.length_field(unit))
    }

    fn length_field(&self, unit: UnitPeriod) -> u32 {
        ((self.value >> crate::unit::UNIT_BITS) & unit.length_mask()) as u32 + 1
    }

    /// The signed start offset, in the units described by [`Self::encode`].
    pub(crate) fn offset(&self, unit: UnitPeriod) -> i64 {
        self.value >> unit.start_shift()
    }

    /// The unit and length bits. Two values with equal headers are
    /// commensurable.
    pub(crate) fn header(&self, unit: UnitPeriod) -> i64 {
        self.value & ((1 << unit.start_shift()) - 1)
    }

    /// Unpack into the unit, the length, and the start.
    ///
    /// This is the exact inverse of [`Self::encode`] for units with a fixed
    /// length. For months, the start day is clamped to the length of the
    /// month.
    pub fn decode(&self) -> Result<(UnitPeriod, u32, OffsetDateTime), Error> {
        let unit = self.unit()?;
        let length = self.length_field(unit);
        let start = self.start_of(unit)?;
        Ok((unit, length, start))
    }

    pub(crate) fn start_of(&self, unit: UnitPeriod) -> Result<OffsetDateTime, Error> {
        let offset = self.offset(unit);

        if !in_range(unit, offset) {
            return Err(Error::Overflow);
        }

        match unit {
            UnitPeriod::Tick | UnitPeriod::Eternity => from_ticks(offset),
            UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day => {
                let factor = unit.ticks().ok_or(Error::InvalidUnit(unit.ordinal()))?;
                from_ticks(offset.checked_mul(factor).ok_or(Error::Overflow)?)
            }
            UnitPeriod::Month => {
                let (index, anchor) = split_month_offset(offset);
                month_start(index, anchor)
            }
        }
    }

    /// Compare against a value of unknown type. Both `TimePeriod` and
    /// [`Period`] are comparable, anything else is an error.
    pub fn try_compare(&self, other: &dyn Any) -> Result<Ordering, Error> {
        if let Some(other) = other.downcast_ref::<TimePeriod>() {
            Ok(self.cmp(other))
        } else if let Some(other) = other.downcast_ref::<Period>() {
            Ok(self.cmp(&other.inner))
        } else {
            Err(Error::IncomparableType)
        }
    }
}

/// Inclusive bounds of the start offset for a unit. This is the smaller of
/// what fits in the layout and what maps back onto the calendar.
pub(crate) fn start_range(unit: UnitPeriod) -> (i64, i64) {
    let (field_min, field_max) = unit.start_field_range();

    let (min, max) = match unit {
        UnitPeriod::Tick | UnitPeriod::Eternity => tick_range(),
        UnitPeriod::Millisecond
        | UnitPeriod::Second
        | UnitPeriod::Minute
        | UnitPeriod::Hour
        | UnitPeriod::Day => {
            let (min, max) = tick_range();
            let factor = unit.ticks().unwrap_or(1);
            // the lowest boundary at or after min
            let first = min.div_euclid(factor) + i64::from(min.rem_euclid(factor) != 0);
            (first, max.div_euclid(factor))
        }
        UnitPeriod::Month => {
            let (min, max) = month_range();
            (min << ANCHOR_BITS, (max << ANCHOR_BITS) | (31 - 1))
        }
    };

    (min.max(field_min), max.min(field_max))
}

fn in_range(unit: UnitPeriod, offset: i64) -> bool {
    let (min, max) = start_range(unit);
    if offset < min || offset > max {
        return false;
    }

    // the anchor field has room for a 32nd day
    unit != UnitPeriod::Month || split_month_offset(offset).1 <= 31
}

/// Month start offsets hold the month index above the anchor day.
pub(crate) fn month_offset(index: i64, anchor: u8) -> Result<i64, Error> {
    index
        .checked_mul(1 << ANCHOR_BITS)
        .map(|offset| offset | (anchor as i64 - 1))
        .ok_or(Error::Overflow)
}

pub(crate) fn split_month_offset(offset: i64) -> (i64, u8) {
    (offset >> ANCHOR_BITS, (offset & ANCHOR_MASK) as u8 + 1)
}

impl From<TimePeriod> for i64 {
    fn from(period: TimePeriod) -> Self {
        period.value
    }
}

impl From<i64> for TimePeriod {
    fn from(value: i64) -> Self {
        Self { value }
    }
}

/// Renders the raw value, which [`FromStr`] parses back.
impl Display for TimePeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.value.fmt(f)
    }
}

impl FromStr for TimePeriod {
    type Err = core::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self::from_raw)
    }
}
