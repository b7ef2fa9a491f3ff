mod deduction;
mod pay_period;
mod paye_result;
mod tax_bracket;

pub use deduction::Deduction;
pub use pay_period::{MONTHLY_TAX_FREE_ALLOWANCE, PayPeriod};
pub use paye_result::{BracketTax, DeductionLine, PayeResult};
pub use tax_bracket::{
    BracketTableError, MONTHS_PER_YEAR, TaxBracket, brackets_for, validate_brackets,
};
