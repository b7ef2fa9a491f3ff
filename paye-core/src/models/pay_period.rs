use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PayeError;
use crate::models::MONTHS_PER_YEAR;

/// Tax-free allowance for one month of pay.
pub const MONTHLY_TAX_FREE_ALLOWANCE: Decimal = dec!(60000);

/// The period a gross salary figure covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayPeriod {
    #[default]
    Monthly,
    Annual,
}

impl PayPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }

    /// Number of months the period spans.
    pub fn months(&self) -> Decimal {
        match self {
            Self::Monthly => Decimal::ONE,
            Self::Annual => MONTHS_PER_YEAR,
        }
    }

    /// Tax-free allowance for the period.
    pub fn allowance(&self) -> Decimal {
        MONTHLY_TAX_FREE_ALLOWANCE * self.months()
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayPeriod {
    type Err = PayeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(PayeError::InvalidPeriod(s.to_string())),
        }
    }
}
