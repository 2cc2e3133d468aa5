//! Conversions between decimal amounts and integer cents.
//!
//! Amounts travel through the API as [`Decimal`] and are stored as **integer
//! cents** so the database never sees a binary floating point value.

use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{EngineError, ResultEngine};

/// Number of fractional digits an amount may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// Convert a decimal amount into integer cents.
///
/// Fails when the amount has more than two fractional digits or does not fit
/// in an `i64` once expressed in cents.
///
/// ```rust
/// use rust_decimal::Decimal;
///
/// assert_eq!(engine::money::to_minor(Decimal::new(1050, 2)).unwrap(), 1050);
/// assert!(engine::money::to_minor(Decimal::new(12345, 3)).is_err());
/// ```
pub fn to_minor(amount: Decimal) -> ResultEngine<i64> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(EngineError::InvalidExpense(format!(
            "amount {amount} has more than {AMOUNT_SCALE} decimal places"
        )));
    }

    amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_i64())
        .ok_or_else(|| EngineError::InvalidExpense(format!("amount {amount} is too large")))
}

/// Convert integer cents back into a decimal amount with two fractional digits.
pub fn from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, AMOUNT_SCALE)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn to_minor_accepts_up_to_two_decimals() {
        assert_eq!(to_minor(dec!(50)).unwrap(), 5000);
        assert_eq!(to_minor(dec!(10.5)).unwrap(), 1050);
        assert_eq!(to_minor(dec!(0.01)).unwrap(), 1);
        assert_eq!(to_minor(dec!(2.300)).unwrap(), 230);
    }

    #[test]
    fn to_minor_rejects_more_than_two_decimals() {
        assert!(to_minor(dec!(12.345)).is_err());
        assert!(to_minor(dec!(0.001)).is_err());
    }

    #[test]
    fn to_minor_rejects_overflow() {
        assert!(to_minor(Decimal::MAX).is_err());
    }

    #[test]
    fn from_minor_keeps_two_decimals() {
        assert_eq!(from_minor(5000).to_string(), "50.00");
        assert_eq!(from_minor(1).to_string(), "0.01");
    }
}
