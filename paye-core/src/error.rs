use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when a deduction rule is constructed or checked.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeductionError {
    /// Fixed deductions must not be negative.
    #[error("fixed deduction must be non-negative, got {0}")]
    NegativeAmount(Decimal),

    /// Percentage deductions must not be negative.
    #[error("deduction percentage must be non-negative, got {0}")]
    NegativeRate(Decimal),
}

/// Errors raised when a PAYE calculation is set up.
///
/// Once a [`crate::PayeCalculator`] exists its calculation cannot fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayeError {
    /// The pay period is neither monthly nor annual.
    #[error("invalid pay period '{0}', expected 'monthly' or 'annual'")]
    InvalidPeriod(String),

    /// Gross salary must not be negative.
    #[error("gross salary must be non-negative, got {0}")]
    NegativeGross(Decimal),

    /// An amount grew beyond what a `Decimal` can hold.
    #[error("{0} is too large to calculate")]
    AmountOutOfRange(&'static str),

    /// One of the custom deductions is invalid.
    #[error("deduction #{position} is invalid")]
    Deduction {
        position: usize,
        #[source]
        source: DeductionError,
    },
}
