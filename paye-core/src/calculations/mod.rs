//! Payroll calculations.
//!
//! [`paye`] holds the PAYE engine and the progressive bracket walk;
//! [`common`] holds the rounding helpers both rely on.

pub mod common;
pub mod paye;

pub use paye::{
    BandTax, PayeCalculator, SOCIAL_SECURITY_RATE, TaxComputation, progressive_tax,
};
