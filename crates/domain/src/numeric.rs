//! Conversions at the boundary between physical quantities and money.
//!
//! Distances and durations are carried as `f64`; every amount of money is a
//! `rust_decimal::Decimal`. The conversion is checked so that a NaN or
//! infinite measurement can never silently poison a currency amount.

use rust_decimal::Decimal;

use crate::errors::{LoadQuoteError, Result};

/// Convert a physical measurement into a decimal for use in cost math.
///
/// Fails with a validation error for non-finite inputs instead of producing
/// a garbage amount.
pub fn decimal_from_f64(value: f64) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(LoadQuoteError::Validation(format!(
            "cannot convert non-finite value {value} to a decimal amount"
        )));
    }
    Decimal::from_f64_retain(value).ok_or_else(|| {
        LoadQuoteError::Validation(format!("value {value} is out of decimal range"))
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn converts_plain_measurements() {
        assert_eq!(decimal_from_f64(550.0).unwrap(), dec!(550));
        assert_eq!(decimal_from_f64(0.0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(decimal_from_f64(f64::NAN).is_err());
        assert!(decimal_from_f64(f64::INFINITY).is_err());
    }
}
