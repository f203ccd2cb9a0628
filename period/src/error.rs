use thiserror::Error;

/// Errors returned for period construction and arithmetic.
#[non_exhaustive]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid unit discriminant: {0}")]
    InvalidUnit(i8),
    #[error("cannot compare a period with a value of a different type")]
    IncomparableType,
    #[error("periods must have the same unit and length")]
    MismatchedUnit,
    #[error("the value is outside of the representable range")]
    Overflow,
    #[error("period length must be at least 1")]
    NonPositiveLength,
}
