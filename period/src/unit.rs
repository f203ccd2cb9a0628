//! Units of measure for periods and the bit layout each one uses.
//!
//! A packed period stores three fields in a single `i64`, least significant
//! bits first:
//!
//! ```text
//! [ unit (4) ][ length - 1 (L) ][ start offset (64 - 4 - L), signed ]
//! ```
//!
//! The width `L` of the length field depends on the unit. Tick and Eternity
//! need as many bits as possible for the start offset, which is always a
//! count of ticks for them, so their length field is narrow.

use crate::Error;
use core::fmt::Display;

pub const TICKS_PER_MILLISECOND: i64 = 10_000;
pub const TICKS_PER_SECOND: i64 = 1_000 * TICKS_PER_MILLISECOND;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

pub(crate) const UNIT_BITS: u32 = 4;
pub(crate) const UNIT_MASK: i64 = (1 << UNIT_BITS) - 1;

const NARROW_LENGTH_BITS: u32 = 4;
const WIDE_LENGTH_BITS: u32 = 12;

/// Month start offsets carry the anchor day (1..=31) in their low bits.
pub(crate) const ANCHOR_BITS: u32 = 5;
pub(crate) const ANCHOR_MASK: i64 = (1 << ANCHOR_BITS) - 1;

/// The granularity of a period.
///
/// The discriminants are part of the packed representation and must not be
/// renumbered. Zero is reserved and never a valid unit.
#[repr(i8)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum UnitPeriod {
    /// 100 nanoseconds
    Tick = -1,
    Millisecond = 1,
    Second = 2,
    Minute = 3,
    Hour = 4,
    Day = 5,
    /// Calendar month, 28 to 31 days
    Month = 6,
    /// A constant period with no subdivisions
    Eternity = 7,
}

impl UnitPeriod {
    pub const ALL: [UnitPeriod; 8] = [
        UnitPeriod::Tick,
        UnitPeriod::Millisecond,
        UnitPeriod::Second,
        UnitPeriod::Minute,
        UnitPeriod::Hour,
        UnitPeriod::Day,
        UnitPeriod::Month,
        UnitPeriod::Eternity,
    ];

    pub const fn ordinal(self) -> i8 {
        self as i8
    }

    /// Returns the number of ticks in one unit, or `None` if the unit does
    /// not have a fixed length.
    pub const fn ticks(self) -> Option<i64> {
        match self {
            UnitPeriod::Tick => Some(1),
            UnitPeriod::Millisecond => Some(TICKS_PER_MILLISECOND),
            UnitPeriod::Second => Some(TICKS_PER_SECOND),
            UnitPeriod::Minute => Some(TICKS_PER_MINUTE),
            UnitPeriod::Hour => Some(TICKS_PER_HOUR),
            UnitPeriod::Day => Some(TICKS_PER_DAY),
            UnitPeriod::Month => None,
            UnitPeriod::Eternity => None,
        }
    }

    pub const fn is_fixed(self) -> bool {
        self.ticks().is_some()
    }

    pub const fn is_variable(self) -> bool {
        matches!(self, UnitPeriod::Month)
    }

    pub const fn is_eternal(self) -> bool {
        matches!(self, UnitPeriod::Eternity)
    }

    /// The value stored in the unit field. Tick maps to zero so that the
    /// codes stay in `0..16`.
    pub(crate) const fn code(self) -> i64 {
        self.ordinal() as i64 + 1
    }

    pub(crate) fn from_code(code: i64) -> Result<Self, Error> {
        Self::try_from((code - 1) as i8)
    }

    /// Width of the length field in bits.
    pub const fn length_bits(self) -> u32 {
        match self {
            UnitPeriod::Tick | UnitPeriod::Eternity => NARROW_LENGTH_BITS,
            UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day
            | UnitPeriod::Month => WIDE_LENGTH_BITS,
        }
    }

    /// The largest length multiplier the layout can hold for this unit.
    pub const fn max_length(self) -> u32 {
        1 << self.length_bits()
    }

    pub(crate) const fn length_mask(self) -> i64 {
        (1 << self.length_bits()) - 1
    }

    /// Bit position of the start offset.
    pub const fn start_shift(self) -> u32 {
        UNIT_BITS + self.length_bits()
    }

    /// Width of the signed start offset in bits.
    pub const fn start_bits(self) -> u32 {
        64 - self.start_shift()
    }

    /// Inclusive bounds of the start offset field.
    pub(crate) const fn start_field_range(self) -> (i64, i64) {
        let half = 1_i64 << (self.start_bits() - 1);
        (-half, half - 1)
    }

    pub(crate) const fn singular(self) -> &'static str {
        match self {
            UnitPeriod::Tick => "tick",
            UnitPeriod::Millisecond => "millisecond",
            UnitPeriod::Second => "second",
            UnitPeriod::Minute => "minute",
            UnitPeriod::Hour => "hour",
            UnitPeriod::Day => "day",
            UnitPeriod::Month => "month",
            UnitPeriod::Eternity => "eternity",
        }
    }

    pub(crate) const fn plural(self) -> &'static str {
        match self {
            UnitPeriod::Tick => "ticks",
            UnitPeriod::Millisecond => "milliseconds",
            UnitPeriod::Second => "seconds",
            UnitPeriod::Minute => "minutes",
            UnitPeriod::Hour => "hours",
            UnitPeriod::Day => "days",
            UnitPeriod::Month => "months",
            UnitPeriod::Eternity => "eternities",
        }
    }
}

impl TryFrom<i8> for UnitPeriod {
    type Error = Error;

    fn try_from(ordinal: i8) -> Result<Self, Self::Error> {
        match ordinal {
            -1 => Ok(UnitPeriod::Tick),
            1 => Ok(UnitPeriod::Millisecond),
            2 => Ok(UnitPeriod::Second),
            3 => Ok(UnitPeriod::Minute),
            4 => Ok(UnitPeriod::Hour),
            5 => Ok(UnitPeriod::Day),
            6 => Ok(UnitPeriod::Month),
            7 => Ok(UnitPeriod::Eternity),
            _ => Err(Error::InvalidUnit(ordinal)),
        }
    }
}

impl From<UnitPeriod> for i8 {
    fn from(unit: UnitPeriod) -> Self {
        unit.ordinal()
    }
}

impl Display for UnitPeriod {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.singular())
    }
}
