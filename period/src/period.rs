use crate::datetime::{from_ticks, month_start, DateTime};
use crate::time_period::{month_offset, split_month_offset};
use crate::unit::UNIT_MASK;
use crate::{Builder, Error, TimePeriod, UnitPeriod};
use core::any::Any;
use core::cmp::Ordering;
use core::fmt::Display;
use time::OffsetDateTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A span of time measured in a unit, with a length multiplier and a start.
///
/// A `Period` is a [`TimePeriod`] which is known to decode, so it has the
/// same size and the same ordering. Periods are immutable, every operation
/// returns a new value.
///
/// ```
/// use period::{Period, UnitPeriod};
/// use time::macros::datetime;
///
/// let today = Period::new(UnitPeriod::Day, 1, datetime!(2024-01-01 00:00 UTC)).unwrap();
/// let tomorrow = today.next().unwrap();
///
/// assert_eq!(tomorrow.start(), datetime!(2024-01-02 00:00 UTC));
/// assert_eq!(tomorrow.diff(&today), Ok(1));
/// assert!(today < tomorrow);
/// ```
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "TimePeriod", into = "TimePeriod")
)]
pub struct Period {
    pub(crate) inner: TimePeriod,
}

impl Period {
    /// Create a new period. See [`TimePeriod::encode`] for how the start is
    /// aligned to the unit.
    pub fn new(unit: UnitPeriod, length: u32, start: OffsetDateTime) -> Result<Self, Error> {
        TimePeriod::encode(unit, length, start).map(|inner| Self { inner })
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn unit(&self) -> UnitPeriod {
        match UnitPeriod::from_code(self.inner.value & UNIT_MASK) {
            Ok(unit) => unit,
            Err(_) => unreachable!("period was validated on construction"),
        }
    }

    pub fn length(&self) -> u32 {
        match self.inner.length() {
            Ok(length) => length,
            Err(_) => unreachable!("period was validated on construction"),
        }
    }

    /// The first instant of the period, in UTC.
    pub fn start(&self) -> OffsetDateTime {
        match self.inner.start_of(self.unit()) {
            Ok(start) => start,
            Err(_) => unreachable!("period was validated on construction"),
        }
    }

    /// The first instant after the period. Eternity has no end and returns
    /// `Ok(None)`.
    ///
    /// The end is computed from the start and the span, so it exists even
    /// when the next period does not fit in the layout. It is an
    /// `Error::Overflow` only if the end lies beyond the calendar.
    pub fn end(&self) -> Result<Option<OffsetDateTime>, Error> {
        let unit = self.unit();
        let length = self.length() as i64;
        let offset = self.inner.offset(unit);

        let end = match unit {
            UnitPeriod::Eternity => return Ok(None),
            UnitPeriod::Tick
            | UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day => {
                let factor = unit.ticks().ok_or(Error::InvalidUnit(unit.ordinal()))?;
                let ticks = offset
                    .checked_add(length)
                    .and_then(|units| units.checked_mul(factor))
                    .ok_or(Error::Overflow)?;
                from_ticks(ticks)?
            }
            UnitPeriod::Month => {
                let (index, anchor) = split_month_offset(offset);
                month_start(index.checked_add(length).ok_or(Error::Overflow)?, anchor)?
            }
        };

        Ok(Some(end))
    }

    /// Returns true if the instant falls within the period.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        if instant < self.start() {
            return false;
        }

        match self.end() {
            Ok(Some(end)) => instant < end,
            Ok(None) => true,
            // every instant the calendar can hold is before an end beyond it
            Err(_) => true,
        }
    }

    pub fn time_period(&self) -> TimePeriod {
        self.inner
    }

    /// Step forward (or backward, for negative `n`) by `n` whole periods of
    /// the same unit and length.
    ///
    /// Month periods keep the day of month they were created with. When the
    /// target month is too short for that day, the start is clamped to the
    /// last day of the month, so January 31st plus one month is the last day
    /// of February. Because the anchor day is kept, stepping back again
    /// returns to January 31st.
    ///
    /// Eternity has no subdivisions and is returned unchanged.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, n: i64) -> Result<Self, Error> {
        let unit = self.unit();
        if unit.is_eternal() {
            return Ok(*self);
        }

        let length = self.length();
        let offset = self.inner.offset(unit);
        let delta = n.checked_mul(length as i64).ok_or(Error::Overflow)?;

        let offset = match unit {
            UnitPeriod::Eternity => offset,
            UnitPeriod::Tick
            | UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day => offset.checked_add(delta).ok_or(Error::Overflow)?,
            UnitPeriod::Month => {
                let (index, anchor) = split_month_offset(offset);
                let index = index.checked_add(delta).ok_or(Error::Overflow)?;
                month_offset(index, anchor)?
            }
        };

        TimePeriod::pack(unit, length, offset).map(|inner| Self { inner })
    }

    pub fn next(&self) -> Result<Self, Error> {
        self.add(1)
    }

    pub fn previous(&self) -> Result<Self, Error> {
        self.add(-1)
    }

    /// Returns the signed number of whole periods from `other` to `self`,
    /// truncated toward zero. This is the inverse of [`Self::add`]:
    /// `p.add(n)?.diff(&p) == Ok(n)`.
    ///
    /// Eternity periods are always zero apart. Periods with a different unit
    /// or length cannot be compared this way.
    pub fn diff(&self, other: &Period) -> Result<i64, Error> {
        let unit = self.unit();
        if unit != other.unit() || self.inner.header(unit) != other.inner.header(unit) {
            return Err(Error::MismatchedUnit);
        }

        let length = self.length() as i64;
        let a = self.inner.offset(unit);
        let b = other.inner.offset(unit);

        // offsets are at most 56 bits wide so the difference can't overflow
        let units = match unit {
            UnitPeriod::Eternity => return Ok(0),
            UnitPeriod::Tick
            | UnitPeriod::Millisecond
            | UnitPeriod::Second
            | UnitPeriod::Minute
            | UnitPeriod::Hour
            | UnitPeriod::Day => a - b,
            UnitPeriod::Month => {
                let (a_index, a_day) = split_month_offset(a);
                let (b_index, b_day) = split_month_offset(b);
                let months = a_index - b_index;

                // a month only counts once the anchor day is reached
                match months.cmp(&0) {
                    Ordering::Greater if a_day < b_day => months - 1,
                    Ordering::Less if a_day > b_day => months + 1,
                    _ => months,
                }
            }
        };

        Ok(units / length)
    }

    /// See [`TimePeriod::try_compare`].
    pub fn try_compare(&self, other: &dyn Any) -> Result<Ordering, Error> {
        self.inner.try_compare(other)
    }
}

impl TryFrom<TimePeriod> for Period {
    type Error = Error;

    fn try_from(other: TimePeriod) -> Result<Self, Self::Error> {
        other.decode().map(|_| Self { inner: other })
    }
}

impl TryFrom<i64> for Period {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::try_from(TimePeriod::from_raw(value))
    }
}

impl From<Period> for TimePeriod {
    fn from(period: Period) -> Self {
        period.inner
    }
}

impl From<Period> for i64 {
    fn from(period: Period) -> Self {
        period.inner.value
    }
}

/// Renders as `3 days starting 2024-01-01T00:00:00.0000000+00:00`.
impl Display for Period {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let unit = self.unit();
        let length = self.length();
        let name = if length == 1 {
            unit.singular()
        } else {
            unit.plural()
        };
        write!(
            f,
            "{length} {name} starting {}",
            DateTime::from(self.start())
        )
    }
}
