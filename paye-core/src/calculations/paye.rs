//! Pay-As-You-Earn (PAYE) calculation for a single gross salary.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Social security contribution: gross × 6% |
//! | 2    | Custom deductions: sum of every deduction rule, in order |
//! | 3    | Tax-free allowance: 60,000 per month (× 12 for annual pay) |
//! | 4    | Taxable income: gross − step 1 − step 3 − step 2, minimum 0 |
//! | 5    | PAYE: taxable income walked through the bracket table |
//! | 6    | Net salary: gross − step 1 − step 5 − step 2 |
//!
//! Every step runs at full precision. Output fields are rounded to two
//! decimal places once, when the [`PayeResult`] is built.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{PayPeriod, PayeCalculator};
//!
//! let calculator = PayeCalculator::new(dec!(150000), PayPeriod::Monthly, Vec::new()).unwrap();
//! let result = calculator.calculate();
//!
//! assert_eq!(result.social_security, dec!(9000.00));
//! assert_eq!(result.taxable_income, dec!(81000.00));
//! assert_eq!(result.total_paye, dec!(2100.00));
//! assert_eq!(result.net_salary, dec!(138900.00));
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::{debug, warn};

use crate::calculations::common::{non_negative, round_half_up};
use crate::error::PayeError;
use crate::models::{
    BracketTax, Deduction, DeductionLine, PayPeriod, PayeResult, TaxBracket, brackets_for,
};

/// Employee social security contribution rate. Fixed by statute.
pub const SOCIAL_SECURITY_RATE: Decimal = dec!(0.06);

/// Tax falling in one bracket, before rounding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandTax {
    pub bracket: TaxBracket,
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Outcome of walking taxable income through a bracket table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxComputation {
    pub total_tax: Decimal,

    /// One entry per bracket the income reached, lowest first.
    pub bands: Vec<BandTax>,

    /// Income left over when the table's top bracket has an upper bound.
    /// Always zero for a table that passes [`crate::models::validate_brackets`].
    pub untaxed: Decimal,
}

/// Computes progressive tax on `taxable` at full precision.
///
/// Each bracket absorbs at most its own width of the remaining income, so an
/// income sitting exactly on a boundary is taxed entirely in the lower
/// bracket. The walk stops as soon as no income remains.
///
/// `brackets` must be ordered ascending and contiguous from zero; see
/// [`crate::models::validate_brackets`]. Income the table cannot hold is
/// reported in [`TaxComputation::untaxed`] rather than dropped silently.
pub fn progressive_tax(
    taxable: Decimal,
    brackets: &[TaxBracket],
) -> TaxComputation {
    let mut remaining = taxable;
    let mut computation = TaxComputation::default();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }

        let band = match bracket.width() {
            Some(width) => non_negative(remaining.min(width)),
            None => remaining,
        };
        let tax = band * bracket.tax_rate;

        computation.total_tax += tax;
        computation.bands.push(BandTax {
            bracket: bracket.clone(),
            taxable_amount: band,
            tax,
        });
        remaining -= band;
    }

    if remaining > Decimal::ZERO {
        warn!(
            taxable = %taxable,
            untaxed = %remaining,
            "Bracket table has a bounded top bracket; income above it is not taxed"
        );
        computation.untaxed = remaining;
    }

    computation
}

/// Full-precision figures for one salary, worked out when the calculator
/// is built.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Figures {
    social_security: Decimal,
    deduction_amounts: Vec<Decimal>,
    total_deductions: Decimal,
    allowance: Decimal,
    taxable_income: Decimal,
    computation: TaxComputation,
    net_salary: Decimal,
}

/// Calculator for the PAYE deductions on one gross salary.
///
/// Inputs are checked by [`PayeCalculator::new`], which also works out every
/// figure with overflow-checked arithmetic. After that,
/// [`PayeCalculator::calculate`] cannot fail and always returns the same
/// result for the same calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayeCalculator {
    gross: Decimal,
    period: PayPeriod,
    deductions: Vec<Deduction>,
    figures: Figures,
}

impl PayeCalculator {
    /// Creates a calculator for `gross` pay over `period`.
    ///
    /// # Errors
    ///
    /// Returns [`PayeError`] if:
    /// - `gross` is negative
    /// - any deduction has a negative amount or rate (positions are 1-based)
    /// - any intermediate amount is too large for a `Decimal`
    pub fn new(
        gross: Decimal,
        period: PayPeriod,
        deductions: Vec<Deduction>,
    ) -> Result<Self, PayeError> {
        if gross < Decimal::ZERO {
            return Err(PayeError::NegativeGross(gross));
        }

        for (index, deduction) in deductions.iter().enumerate() {
            deduction
                .validate()
                .map_err(|source| PayeError::Deduction {
                    position: index + 1,
                    source,
                })?;
        }

        let figures = Self::figures(gross, period, &deductions)?;

        Ok(Self {
            gross,
            period,
            deductions,
            figures,
        })
    }

    pub fn gross(&self) -> Decimal {
        self.gross
    }

    pub fn period(&self) -> PayPeriod {
        self.period
    }

    pub fn deductions(&self) -> &[Deduction] {
        &self.deductions
    }

    /// Returns the rounded breakdown.
    pub fn calculate(&self) -> PayeResult {
        let figures = &self.figures;

        if figures.net_salary < Decimal::ZERO {
            warn!(
                gross = %self.gross,
                total_deductions = %figures.total_deductions,
                net_salary = %figures.net_salary,
                "Deductions exceed gross salary; net salary is negative"
            );
        }

        debug!(
            gross = %self.gross,
            period = %self.period,
            taxable_income = %figures.taxable_income,
            total_paye = %figures.computation.total_tax,
            net_salary = %figures.net_salary,
            "PAYE calculated"
        );

        PayeResult {
            period: self.period,
            gross_salary: round_half_up(self.gross),
            social_security: round_half_up(figures.social_security),
            tax_free_allowance: round_half_up(figures.allowance),
            deductions: self
                .deductions
                .iter()
                .zip(&figures.deduction_amounts)
                .map(|(deduction, amount)| DeductionLine {
                    description: deduction.describe(),
                    amount: round_half_up(*amount),
                })
                .collect(),
            total_deductions: round_half_up(figures.total_deductions),
            taxable_income: round_half_up(figures.taxable_income),
            tax_breakdown: figures
                .computation
                .bands
                .iter()
                .map(|band| BracketTax {
                    bracket: band.bracket.label(),
                    taxable_amount: round_half_up(band.taxable_amount),
                    rate_percent: band.bracket.rate_percent(),
                    tax: round_half_up(band.tax),
                })
                .collect(),
            total_paye: round_half_up(figures.computation.total_tax),
            net_salary: round_half_up(figures.net_salary),
        }
    }

    /// Works through the six calculation steps at full precision.
    fn figures(
        gross: Decimal,
        period: PayPeriod,
        deductions: &[Deduction],
    ) -> Result<Figures, PayeError> {
        // Step 1: Social security contribution
        let social_security = in_range(
            gross.checked_mul(SOCIAL_SECURITY_RATE),
            "social security contribution",
        )?;

        // Step 2: Custom deductions, kept in caller order
        let deduction_amounts = deductions
            .iter()
            .map(|deduction| in_range(deduction.checked_amount(gross), "deduction"))
            .collect::<Result<Vec<_>, _>>()?;
        let total_deductions = deduction_amounts
            .iter()
            .try_fold(Decimal::ZERO, |total, amount| total.checked_add(*amount));
        let total_deductions = in_range(total_deductions, "total deductions")?;

        // Step 3: Tax-free allowance
        let allowance = period.allowance();

        // Step 4: Taxable income
        let taxable_income =
            Self::taxable_income(gross, social_security, allowance, total_deductions)?;

        // Step 5: Progressive tax
        let computation = progressive_tax(taxable_income, brackets_for(period));

        // Step 6: Net salary
        let net_salary = Self::net_salary(
            gross,
            social_security,
            computation.total_tax,
            total_deductions,
        )?;

        Ok(Figures {
            social_security,
            deduction_amounts,
            total_deductions,
            allowance,
            taxable_income,
            computation,
            net_salary,
        })
    }

    /// Income left to tax after contributions, allowance and deductions.
    ///
    /// Deductions beyond gross pay do not make taxable income negative.
    fn taxable_income(
        gross: Decimal,
        social_security: Decimal,
        allowance: Decimal,
        total_deductions: Decimal,
    ) -> Result<Decimal, PayeError> {
        let remaining = gross
            .checked_sub(social_security)
            .and_then(|value| value.checked_sub(allowance))
            .and_then(|value| value.checked_sub(total_deductions));
        in_range(remaining, "taxable income").map(non_negative)
    }

    /// Take-home pay. Negative when deductions exceed gross.
    fn net_salary(
        gross: Decimal,
        social_security: Decimal,
        total_tax: Decimal,
        total_deductions: Decimal,
    ) -> Result<Decimal, PayeError> {
        let net = gross
            .checked_sub(social_security)
            .and_then(|value| value.checked_sub(total_tax))
            .and_then(|value| value.checked_sub(total_deductions));
        in_range(net, "net salary")
    }
}

/// Turns an overflowed checked operation into [`PayeError::AmountOutOfRange`].
fn in_range(
    value: Option<Decimal>,
    figure: &'static str,
) -> Result<Decimal, PayeError> {
    value.ok_or(PayeError::AmountOutOfRange(figure))
}
