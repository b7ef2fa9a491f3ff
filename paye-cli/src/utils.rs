use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command-line amount cannot be parsed.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("amount is empty")]
    Empty,

    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

/// Trims whitespace and drops `,` and `_` digit separators.
fn normalize_amount_input(s: &str) -> String {
    s.trim().replace([',', '_'], "")
}

/// Parses an RWF amount or a percentage such as `1,500,000` or `7.5`.
///
/// Negative values are accepted here; the calculator decides whether
/// they are allowed.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Err(ParseAmountError::Empty);
    }
    normalized.parse().map_err(|source| {
        tracing::debug!(input = %s, "rejected amount");
        ParseAmountError::Invalid {
            input: s.to_string(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_thousands_separators() {
        assert_eq!(parse_amount("1,500,000").unwrap(), dec!(1500000));
        assert_eq!(parse_amount("150_000.50").unwrap(), dec!(150000.50));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  7.5 ").unwrap(), dec!(7.5));
    }

    #[test]
    fn parse_amount_keeps_sign() {
        assert_eq!(parse_amount("-250").unwrap(), dec!(-250));
    }

    #[test]
    fn parse_amount_rejects_empty_input() {
        assert!(matches!(parse_amount("   "), Err(ParseAmountError::Empty)));
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        let err = parse_amount("12abc").unwrap_err();

        assert!(err.to_string().starts_with("invalid amount '12abc'"));
    }
}
