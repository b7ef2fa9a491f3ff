//! Plain-text rendering of a PAYE breakdown.

use std::fmt;

use paye_core::PayeResult;
use rust_decimal::Decimal;

/// Currency every amount is printed in.
pub const CURRENCY: &str = "RWF";

fn money(amount: Decimal) -> String {
    format!("{CURRENCY} {amount:.2}")
}

/// Writes a result as labeled lines, one bullet per deduction and per
/// bracket reached.
pub fn write_report(
    out: &mut impl fmt::Write,
    result: &PayeResult,
) -> fmt::Result {
    writeln!(out, "Pay period: {}", result.period)?;
    writeln!(out, "Gross salary: {}", money(result.gross_salary))?;
    writeln!(
        out,
        " – Social Security (6%): {}",
        money(result.social_security)
    )?;
    writeln!(
        out,
        " – Tax-free allowance: {}",
        money(result.tax_free_allowance)
    )?;
    writeln!(
        out,
        " – Custom deductions: {}",
        money(result.total_deductions)
    )?;
    for line in &result.deductions {
        writeln!(out, "   • {}: {}", line.description, money(line.amount))?;
    }
    writeln!(out, " – Taxable income: {}", money(result.taxable_income))?;
    for band in &result.tax_breakdown {
        writeln!(
            out,
            "   • {} @ {}%: {} → Tax {}",
            band.bracket,
            band.rate_percent,
            money(band.taxable_amount),
            money(band.tax)
        )?;
    }
    writeln!(out, " – Total PAYE: {}", money(result.total_paye))?;
    write!(out, " – Net salary: {}", money(result.net_salary))
}

/// Report text for one result.
pub struct Report<'a>(pub &'a PayeResult);

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write_report(f, self.0)
    }
}

/// Renders a result with [`write_report`].
pub fn render_text(result: &PayeResult) -> String {
    Report(result).to_string()
}
