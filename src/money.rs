//! Money amount validation and formatting
//!
//! Every balance and amount in the system is a `rust_decimal::Decimal`
//! backed by a DECIMAL(15,2) column. Binary floating point is never used
//! for money.

use rust_decimal::Decimal;
use thiserror::Error;

/// Fractional digits carried by every monetary column
pub const FRACTION_DIGITS: u32 = 2;

/// Amount validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("invalid amount: {0}")]
    InvalidFormat(String),

    #[error("amount must be greater than zero")]
    NonPositive,

    #[error("amount precision exceeds {max} decimal places (got {provided})")]
    PrecisionOverflow { provided: u32, max: u32 },
}

/// Validate a monetary amount: strictly positive, at most two fraction
/// digits. Returns the amount normalized to exactly two fraction digits.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, MoneyError> {
    if amount <= Decimal::ZERO {
        return Err(MoneyError::NonPositive);
    }
    if amount.scale() > FRACTION_DIGITS {
        return Err(MoneyError::PrecisionOverflow {
            provided: amount.scale(),
            max: FRACTION_DIGITS,
        });
    }
    let mut normalized = amount;
    normalized.rescale(FRACTION_DIGITS);
    Ok(normalized)
}

/// Parse a user-supplied amount string and validate it.
pub fn parse_amount(input: &str) -> Result<Decimal, MoneyError> {
    let amount = Decimal::from_str_exact(input.trim())
        .map_err(|_| MoneyError::InvalidFormat(input.to_string()))?;
    validate_amount(amount)
}

/// Format an amount for notification and audit text ("40.00" style).
pub fn format_amount(amount: Decimal) -> String {
    let mut normalized = amount;
    normalized.rescale(FRACTION_DIGITS);
    normalized.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_amount_positive() {
        assert_eq!(validate_amount(dec!(40)).unwrap(), dec!(40.00));
        assert_eq!(validate_amount(dec!(0.01)).unwrap(), dec!(0.01));
        assert_eq!(validate_amount(dec!(1234.5)).unwrap(), dec!(1234.50));
    }

    #[test]
    fn test_validate_amount_rejects_non_positive() {
        assert_eq!(validate_amount(dec!(0)), Err(MoneyError::NonPositive));
        assert_eq!(validate_amount(dec!(-5.00)), Err(MoneyError::NonPositive));
    }

    #[test]
    fn test_validate_amount_rejects_excess_precision() {
        assert_eq!(
            validate_amount(dec!(1.001)),
            Err(MoneyError::PrecisionOverflow {
                provided: 3,
                max: 2
            })
        );
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("40.00").unwrap(), dec!(40.00));
        assert_eq!(parse_amount("  25.5 ").unwrap(), dec!(25.50));
        assert!(matches!(
            parse_amount("not-a-number"),
            Err(MoneyError::InvalidFormat(_))
        ));
        assert_eq!(parse_amount("-1"), Err(MoneyError::NonPositive));
    }

    #[test]
    fn test_format_amount_always_two_digits() {
        assert_eq!(format_amount(dec!(40)), "40.00");
        assert_eq!(format_amount(dec!(0.5)), "0.50");
        assert_eq!(format_amount(dec!(123.45)), "123.45");
    }
}
