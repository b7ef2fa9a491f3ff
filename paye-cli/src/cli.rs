use anyhow::{Context, Result};
use clap::Parser;
use paye_core::{Deduction, DeductionError, PayPeriod, PayeCalculator};
use rust_decimal::Decimal;
use tracing::debug;

use crate::report;
use crate::utils::parse_amount;

/// PAYE calculator for Rwandan salaries.
///
/// Computes the social security contribution, taxable income, PAYE and net
/// salary for a gross salary, with optional extra deductions.
#[derive(Debug, Parser)]
#[command(name = "rwanda-paye", version, about, long_about = None)]
pub struct Cli {
    /// Gross salary in RWF for the chosen period (e.g. 150000 or 1,800,000).
    #[arg(value_parser = parse_amount, allow_negative_numbers = true)]
    pub gross: Decimal,

    /// Pay period the gross salary covers: monthly or annual.
    #[arg(short, long, default_value = "monthly")]
    pub mode: PayPeriod,

    /// Fixed deduction in RWF. Repeat for several.
    #[arg(
        long,
        value_name = "AMOUNT",
        value_parser = parse_amount,
        allow_negative_numbers = true
    )]
    pub fixed: Vec<Decimal>,

    /// Percentage-of-gross deduction, 5 meaning 5%. Repeat for several.
    #[arg(
        long,
        value_name = "PERCENT",
        value_parser = parse_amount,
        allow_negative_numbers = true
    )]
    pub percent: Vec<Decimal>,

    /// Print the breakdown as JSON instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

impl Cli {
    /// Builds the deduction rules: fixed amounts first, then percentages,
    /// each in the order given.
    pub fn deductions(&self) -> Result<Vec<Deduction>, DeductionError> {
        let fixed = self.fixed.iter().map(|amount| Deduction::fixed(*amount));
        let percent = self.percent.iter().map(|rate| Deduction::percentage(*rate));
        fixed.chain(percent).collect()
    }
}

/// Runs a parsed command line and returns the text to print.
pub fn run(cli: &Cli) -> Result<String> {
    let deductions = cli.deductions().context("invalid deduction")?;
    debug!(
        gross = %cli.gross,
        mode = %cli.mode,
        deductions = deductions.len(),
        "calculating PAYE"
    );

    let calculator = PayeCalculator::new(cli.gross, cli.mode, deductions)
        .context("cannot calculate PAYE")?;
    let result = calculator.calculate();

    if cli.json {
        serde_json::to_string_pretty(&result).context("failed to serialize result")
    } else {
        Ok(report::render_text(&result))
    }
}
