//! This crate provides calendar periods with a fixed-size representation. A
//! period is a span of time measured in a unit (ticks of 100ns through days,
//! calendar months, or an unbounded eternity), a length multiplier, and a
//! start. "3 hours starting at 2024-01-01T09:00Z" is a period.
//!
//! Every period packs into a single `i64`. The start occupies the most
//! significant bits, so sorting or comparing periods of the same unit and
//! length is a single integer comparison and never needs a decode.
//!
//! Periods support exact arithmetic: stepping forward or backward by whole
//! periods with [`Period::add`], and counting the periods between two values
//! with [`Period::diff`]. Month arithmetic follows the calendar, clamping to
//! the end of shorter months.
//!
//! ```
//! use period::{Period, UnitPeriod};
//! use time::macros::datetime;
//!
//! let month = Period::new(UnitPeriod::Month, 1, datetime!(2024-01-31 00:00 UTC)).unwrap();
//! let next = month.next().unwrap();
//!
//! assert_eq!(next.start(), datetime!(2024-02-29 00:00 UTC));
//! assert_eq!(next.previous(), Ok(month));
//! ```

mod builder;
mod datetime;
mod error;
mod period;
mod time_period;

pub mod unit;

pub use builder::Builder;
pub use datetime::DateTime;
pub use error::Error;
pub use period::Period;
pub use time_period::TimePeriod;
pub use unit::UnitPeriod;
