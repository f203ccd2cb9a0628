use crate::{Error, Period, UnitPeriod};
use time::OffsetDateTime;

/// A builder for constructing a [`Period`].
///
/// By default the builder produces a single day starting at the unix epoch.
#[derive(Copy, Clone, Debug)]
pub struct Builder {
    unit: UnitPeriod,
    length: u32,
    start: OffsetDateTime,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Self {
            unit: UnitPeriod::Day,
            length: 1,
            start: OffsetDateTime::UNIX_EPOCH,
        }
    }

    /// Set the unit the period is measured in.
    pub fn unit(mut self, unit: UnitPeriod) -> Self {
        self.unit = unit;
        self
    }

    /// Set how many units make up one period. Must be at least one, and no
    /// more than [`UnitPeriod::max_length`] for the chosen unit.
    pub fn length(mut self, length: u32) -> Self {
        self.length = length;
        self
    }

    /// Set the start of the period. The start will be converted to UTC and
    /// aligned to the unit when the period is built.
    pub fn start(mut self, start: OffsetDateTime) -> Self {
        self.start = start;
        self
    }

    /// Consumes this `Builder` and produces a `Period`.
    pub fn build(self) -> Result<Period, Error> {
        Period::new(self.unit, self.length, self.start)
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn defaults() {
        let period = Period::builder().build().unwrap();
        assert_eq!(period.unit(), UnitPeriod::Day);
        assert_eq!(period.length(), 1);
        assert_eq!(period.start(), OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn build() {
        let period = Period::builder()
            .unit(UnitPeriod::Minute)
            .length(30)
            .start(datetime!(2024-07-04 16:20:15 UTC))
            .build()
            .unwrap();

        assert_eq!(
            period,
            Period::new(UnitPeriod::Minute, 30, datetime!(2024-07-04 16:20 UTC)).unwrap()
        );
    }

    #[test]
    fn invalid() {
        assert_eq!(
            Period::builder().length(0).build(),
            Err(Error::NonPositiveLength)
        );
        assert_eq!(
            Period::builder()
                .unit(UnitPeriod::Tick)
                .length(UnitPeriod::Tick.max_length() + 1)
                .build(),
            Err(Error::Overflow)
        );
    }
}
