use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DeductionError;

/// An extra deduction rule taken from gross pay.
///
/// Use [`Deduction::fixed`] and [`Deduction::percentage`] to build checked
/// values. Variants built directly are checked again when they are handed to
/// [`crate::PayeCalculator::new`].
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use paye_core::Deduction;
///
/// let pension = Deduction::percentage(dec!(5)).unwrap();
/// let union_dues = Deduction::fixed(dec!(10000)).unwrap();
///
/// assert_eq!(pension.amount(dec!(200000)), dec!(10000.00));
/// assert_eq!(union_dues.amount(dec!(200000)), dec!(10000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Deduction {
    /// A constant amount, independent of gross pay.
    Fixed { value: Decimal },

    /// A fraction of gross pay (`0.05` for 5%).
    Percentage { rate: Decimal },
}

impl Deduction {
    /// Builds a fixed deduction.
    ///
    /// # Errors
    ///
    /// Returns [`DeductionError::NegativeAmount`] if `amount` is negative.
    pub fn fixed(amount: Decimal) -> Result<Self, DeductionError> {
        let deduction = Self::Fixed { value: amount };
        deduction.validate()?;
        Ok(deduction)
    }

    /// Builds a percentage deduction from a human percentage (5 means 5%).
    ///
    /// # Errors
    ///
    /// Returns [`DeductionError::NegativeRate`] if `percent` is negative.
    pub fn percentage(percent: Decimal) -> Result<Self, DeductionError> {
        if percent < Decimal::ZERO {
            return Err(DeductionError::NegativeRate(percent));
        }
        Ok(Self::Percentage {
            rate: percent / Decimal::ONE_HUNDRED,
        })
    }

    /// Amount this rule takes from `gross`.
    pub fn amount(
        &self,
        gross: Decimal,
    ) -> Decimal {
        match self {
            Self::Fixed { value } => *value,
            Self::Percentage { rate } => gross * *rate,
        }
    }

    /// Like [`Deduction::amount`], but returns `None` instead of
    /// overflowing.
    pub fn checked_amount(
        &self,
        gross: Decimal,
    ) -> Option<Decimal> {
        match self {
            Self::Fixed { value } => Some(*value),
            Self::Percentage { rate } => gross.checked_mul(*rate),
        }
    }

    /// Checks the stored parameter is non-negative.
    pub fn validate(&self) -> Result<(), DeductionError> {
        match *self {
            Self::Fixed { value } if value < Decimal::ZERO => {
                Err(DeductionError::NegativeAmount(value))
            }
            Self::Percentage { rate } if rate < Decimal::ZERO => Err(
                DeductionError::NegativeRate((rate * Decimal::ONE_HUNDRED).normalize()),
            ),
            _ => Ok(()),
        }
    }

    /// Short label for itemized output, e.g. `fixed` or `5% of gross`.
    pub fn describe(&self) -> String {
        match self {
            Self::Fixed { .. } => "fixed".to_string(),
            Self::Percentage { rate } => {
                format!("{}% of gross", (*rate * Decimal::ONE_HUNDRED).normalize())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn fixed_ignores_gross() {
        let deduction = Deduction::fixed(dec!(10000)).unwrap();

        assert_eq!(deduction.amount(dec!(0)), dec!(10000));
        assert_eq!(deduction.amount(dec!(500000)), dec!(10000));
    }

    #[test]
    fn percentage_converts_human_percent_to_fraction() {
        let deduction = Deduction::percentage(dec!(5)).unwrap();

        assert_eq!(deduction, Deduction::Percentage { rate: dec!(0.05) });
    }

    #[test]
    fn percentage_scales_with_gross() {
        let deduction = Deduction::percentage(dec!(5)).unwrap();

        assert_eq!(deduction.amount(dec!(200000)), dec!(10000));
        assert_eq!(deduction.amount(dec!(0)), dec!(0));
    }

    #[test]
    fn percentage_keeps_fractional_precision() {
        let deduction = Deduction::percentage(dec!(2.5)).unwrap();

        assert_eq!(deduction.amount(dec!(1234.56)), dec!(30.864));
    }

    #[test]
    fn checked_amount_matches_amount_in_range() {
        let deduction = Deduction::percentage(dec!(5)).unwrap();

        assert_eq!(deduction.checked_amount(dec!(200000)), Some(dec!(10000)));
    }

    #[test]
    fn checked_amount_is_none_on_overflow() {
        let deduction = Deduction::percentage(dec!(200)).unwrap();

        assert_eq!(deduction.checked_amount(Decimal::MAX), None);
    }

    #[test]
    fn zero_deductions_are_allowed() {
        assert_eq!(Deduction::fixed(dec!(0)).unwrap().amount(dec!(100)), dec!(0));
        assert_eq!(
            Deduction::percentage(dec!(0)).unwrap().amount(dec!(100)),
            dec!(0)
        );
    }

    #[test]
    fn fixed_rejects_negative_amount() {
        let result = Deduction::fixed(dec!(-1));

        assert_eq!(result, Err(DeductionError::NegativeAmount(dec!(-1))));
    }

    #[test]
    fn percentage_rejects_negative_rate() {
        let result = Deduction::percentage(dec!(-5));

        assert_eq!(result, Err(DeductionError::NegativeRate(dec!(-5))));
    }

    #[test]
    fn validate_catches_directly_built_negative_rate() {
        let deduction = Deduction::Percentage { rate: dec!(-0.05) };

        assert_eq!(
            deduction.validate(),
            Err(DeductionError::NegativeRate(dec!(-5)))
        );
    }

    #[test]
    fn describe_labels_variants() {
        assert_eq!(Deduction::fixed(dec!(1)).unwrap().describe(), "fixed");
        assert_eq!(
            Deduction::percentage(dec!(5)).unwrap().describe(),
            "5% of gross"
        );
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_string(&Deduction::Fixed { value: dec!(100) }).unwrap();

        assert_eq!(json, r#"{"kind":"fixed","value":"100"}"#);
    }
}
