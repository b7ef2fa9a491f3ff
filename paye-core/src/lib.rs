//! Rwandan Pay-As-You-Earn (PAYE) payroll deductions.
//!
//! Build zero or more [`Deduction`] rules, hand them to a [`PayeCalculator`]
//! with a gross salary and a [`PayPeriod`], and read the [`PayeResult`].

pub mod calculations;
pub mod error;
pub mod models;

pub use calculations::{PayeCalculator, progressive_tax};
pub use error::{DeductionError, PayeError};
pub use models::*;
