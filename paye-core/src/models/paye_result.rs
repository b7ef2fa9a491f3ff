use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::PayPeriod;

/// One custom deduction as it was applied, in the caller's order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    pub description: String,
    pub amount: Decimal,
}

/// Tax owed on the slice of taxable income falling in one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    /// Bracket bounds, e.g. `60000–100000` or `200000–∞`.
    pub bracket: String,

    pub taxable_amount: Decimal,

    /// Marginal rate as a percentage (10 for 10%).
    pub rate_percent: Decimal,

    pub tax: Decimal,
}

/// Breakdown produced by a PAYE calculation.
///
/// Every money field is rounded to two decimal places. Only `net_salary`
/// can be negative, when deductions exceed gross pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayeResult {
    pub period: PayPeriod,
    pub gross_salary: Decimal,

    /// Employee social security contribution (6% of gross).
    pub social_security: Decimal,

    pub tax_free_allowance: Decimal,

    /// Custom deductions, itemized.
    pub deductions: Vec<DeductionLine>,

    /// Sum of the custom deductions.
    pub total_deductions: Decimal,

    pub taxable_income: Decimal,

    /// Brackets reached by the taxable income, lowest first.
    pub tax_breakdown: Vec<BracketTax>,

    pub total_paye: Decimal,
    pub net_salary: Decimal,
}
