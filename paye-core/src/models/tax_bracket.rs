use std::sync::LazyLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::PayPeriod;

/// Number of monthly pay periods in a year.
pub const MONTHS_PER_YEAR: Decimal = dec!(12);

/// A contiguous income range taxed at one marginal rate.
///
/// `max_income` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub min_income: Decimal,
    pub max_income: Option<Decimal>,
    pub tax_rate: Decimal,
}

impl TaxBracket {
    pub const fn new(
        min_income: Decimal,
        max_income: Option<Decimal>,
        tax_rate: Decimal,
    ) -> Self {
        Self {
            min_income,
            max_income,
            tax_rate,
        }
    }

    /// Size of the bracket, or `None` when it has no upper bound.
    pub fn width(&self) -> Option<Decimal> {
        self.max_income.map(|max| max - self.min_income)
    }

    /// Returns a copy with both bounds multiplied by `factor`.
    ///
    /// The rate is unchanged and an open upper bound stays open.
    pub fn scaled(
        &self,
        factor: Decimal,
    ) -> Self {
        Self {
            min_income: self.min_income * factor,
            max_income: self.max_income.map(|max| max * factor),
            tax_rate: self.tax_rate,
        }
    }

    /// Display label such as `60000–100000`, or `200000–∞` for the top bracket.
    pub fn label(&self) -> String {
        let upper = self
            .max_income
            .map(|max| max.trunc().normalize().to_string())
            .unwrap_or_else(|| "∞".to_string());
        format!("{}–{}", self.min_income.trunc().normalize(), upper)
    }

    /// Marginal rate expressed as a percentage (0.10 becomes 10).
    pub fn rate_percent(&self) -> Decimal {
        (self.tax_rate * Decimal::ONE_HUNDRED).normalize()
    }
}

static MONTHLY_BRACKETS: [TaxBracket; 4] = [
    TaxBracket::new(dec!(0), Some(dec!(60000)), dec!(0.00)),
    TaxBracket::new(dec!(60000), Some(dec!(100000)), dec!(0.10)),
    TaxBracket::new(dec!(100000), Some(dec!(200000)), dec!(0.20)),
    TaxBracket::new(dec!(200000), None, dec!(0.30)),
];

static ANNUAL_BRACKETS: LazyLock<Vec<TaxBracket>> = LazyLock::new(|| {
    MONTHLY_BRACKETS
        .iter()
        .map(|bracket| bracket.scaled(MONTHS_PER_YEAR))
        .collect()
});

/// Returns the statutory bracket table for a pay period.
pub fn brackets_for(period: PayPeriod) -> &'static [TaxBracket] {
    match period {
        PayPeriod::Monthly => &MONTHLY_BRACKETS[..],
        PayPeriod::Annual => ANNUAL_BRACKETS.as_slice(),
    }
}

/// Structural problems in a bracket table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketTableError {
    #[error("bracket table is empty")]
    Empty,

    #[error("first bracket must start at 0, got {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} starts at {found}, expected {expected}")]
    Gap {
        index: usize,
        expected: Decimal,
        found: Decimal,
    },

    #[error("bracket {0} is unbounded but is not the last bracket")]
    UnboundedBeforeEnd(usize),

    #[error("last bracket must be unbounded")]
    BoundedTop,

    #[error("bracket {index} has an upper bound {max} not above its lower bound {min}")]
    EmptyRange {
        index: usize,
        min: Decimal,
        max: Decimal,
    },

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {0} rate is lower than the bracket below it")]
    DecreasingRate(usize),
}

/// Checks that a table is ordered, contiguous from zero, open at the top
/// and has non-decreasing rates in `[0, 1]`.
pub fn validate_brackets(brackets: &[TaxBracket]) -> Result<(), BracketTableError> {
    let first = brackets.first().ok_or(BracketTableError::Empty)?;
    if first.min_income != Decimal::ZERO {
        return Err(BracketTableError::NonZeroStart(first.min_income));
    }

    let last_index = brackets.len() - 1;
    let mut expected_start = Decimal::ZERO;
    let mut previous_rate = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.min_income != expected_start {
            return Err(BracketTableError::Gap {
                index,
                expected: expected_start,
                found: bracket.min_income,
            });
        }
        if bracket.tax_rate < Decimal::ZERO || bracket.tax_rate > Decimal::ONE {
            return Err(BracketTableError::InvalidRate {
                index,
                rate: bracket.tax_rate,
            });
        }
        if bracket.tax_rate < previous_rate {
            return Err(BracketTableError::DecreasingRate(index));
        }
        previous_rate = bracket.tax_rate;

        match bracket.max_income {
            Some(max) if max <= bracket.min_income => {
                return Err(BracketTableError::EmptyRange {
                    index,
                    min: bracket.min_income,
                    max,
                });
            }
            Some(_) if index == last_index => return Err(BracketTableError::BoundedTop),
            Some(max) => expected_start = max,
            None if index != last_index => {
                return Err(BracketTableError::UnboundedBeforeEnd(index));
            }
            None => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bracket(
        min: Decimal,
        max: Option<Decimal>,
        rate: Decimal,
    ) -> TaxBracket {
        TaxBracket::new(min, max, rate)
    }

    #[test]
    fn monthly_table_is_valid() {
        assert_eq!(validate_brackets(brackets_for(PayPeriod::Monthly)), Ok(()));
    }

    #[test]
    fn annual_table_is_valid() {
        assert_eq!(validate_brackets(brackets_for(PayPeriod::Annual)), Ok(()));
    }

    #[test]
    fn annual_table_scales_bounds_by_twelve() {
        let annual = brackets_for(PayPeriod::Annual);

        assert_eq!(annual.len(), 4);
        assert_eq!(annual[1].min_income, dec!(720000));
        assert_eq!(annual[1].max_income, Some(dec!(1200000)));
        assert_eq!(annual[2].max_income, Some(dec!(2400000)));
        assert_eq!(annual[3].max_income, None);
    }

    #[test]
    fn annual_table_keeps_monthly_rates() {
        let monthly = brackets_for(PayPeriod::Monthly);
        let annual = brackets_for(PayPeriod::Annual);

        for (m, a) in monthly.iter().zip(annual) {
            assert_eq!(m.tax_rate, a.tax_rate);
        }
    }

    #[test]
    fn width_is_none_for_open_bracket() {
        let top = bracket(dec!(200000), None, dec!(0.30));

        assert_eq!(top.width(), None);
    }

    #[test]
    fn width_is_upper_minus_lower() {
        let second = bracket(dec!(60000), Some(dec!(100000)), dec!(0.10));

        assert_eq!(second.width(), Some(dec!(40000)));
    }

    #[test]
    fn label_renders_integer_bounds() {
        let second = bracket(dec!(60000), Some(dec!(100000)), dec!(0.10));

        assert_eq!(second.label(), "60000–100000");
    }

    #[test]
    fn label_renders_open_bound_as_infinity() {
        let top = bracket(dec!(200000), None, dec!(0.30));

        assert_eq!(top.label(), "200000–∞");
    }

    #[test]
    fn label_truncates_fractional_bounds() {
        let odd = bracket(dec!(0), Some(dec!(1500.75)), dec!(0.10));

        assert_eq!(odd.label(), "0–1500");
    }

    #[test]
    fn rate_percent_drops_trailing_zeros() {
        let second = bracket(dec!(60000), Some(dec!(100000)), dec!(0.10));

        assert_eq!(second.rate_percent().to_string(), "10");
    }

    #[test]
    fn validate_rejects_empty_table() {
        assert_eq!(validate_brackets(&[]), Err(BracketTableError::Empty));
    }

    #[test]
    fn validate_rejects_non_zero_start() {
        let table = [bracket(dec!(10), None, dec!(0.10))];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::NonZeroStart(dec!(10)))
        );
    }

    #[test]
    fn validate_rejects_gap_between_brackets() {
        let table = [
            bracket(dec!(0), Some(dec!(100)), dec!(0.00)),
            bracket(dec!(150), None, dec!(0.10)),
        ];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::Gap {
                index: 1,
                expected: dec!(100),
                found: dec!(150),
            })
        );
    }

    #[test]
    fn validate_rejects_bounded_top() {
        let table = [bracket(dec!(0), Some(dec!(100)), dec!(0.10))];

        assert_eq!(validate_brackets(&table), Err(BracketTableError::BoundedTop));
    }

    #[test]
    fn validate_rejects_unbounded_middle_bracket() {
        let table = [
            bracket(dec!(0), None, dec!(0.00)),
            bracket(dec!(100), None, dec!(0.10)),
        ];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::UnboundedBeforeEnd(0))
        );
    }

    #[test]
    fn validate_rejects_decreasing_rates() {
        let table = [
            bracket(dec!(0), Some(dec!(100)), dec!(0.20)),
            bracket(dec!(100), None, dec!(0.10)),
        ];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::DecreasingRate(1))
        );
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let table = [bracket(dec!(0), None, dec!(1.5))];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::InvalidRate {
                index: 0,
                rate: dec!(1.5),
            })
        );
    }

    #[test]
    fn validate_rejects_empty_range() {
        let table = [
            bracket(dec!(0), Some(dec!(0)), dec!(0.00)),
            bracket(dec!(0), None, dec!(0.10)),
        ];

        assert_eq!(
            validate_brackets(&table),
            Err(BracketTableError::EmptyRange {
                index: 0,
                min: dec!(0),
                max: dec!(0),
            })
        );
    }
}
