//! Protect before using zero or negative amount for deposits, withdraws and transfers.

use std::{borrow::Borrow, ops::Deref};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represent strictly positive financial amount of money
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Amount(Decimal);

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("amount must be positive, got {0}")]
/// represent error when operation want to move zero or negative amount of money
pub struct NonPositiveAmountErr(pub Decimal);

impl TryFrom<Decimal> for Amount {
    type Error = NonPositiveAmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            Err(NonPositiveAmountErr(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<Amount> for Decimal {
    fn from(this: Amount) -> Self {
        this.0
    }
}

impl Borrow<Decimal> for Amount {
    fn borrow(&self) -> &Decimal {
        &self.0
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}

#[cfg(test)]
mod test {
    use super::{Amount, NonPositiveAmountErr};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_and_negative_are_rejected() {
        assert_eq!(
            Amount::try_from(Decimal::ZERO),
            Err(NonPositiveAmountErr(Decimal::ZERO))
        );
        assert_eq!(
            Amount::try_from(dec!(-0.01)),
            Err(NonPositiveAmountErr(dec!(-0.01)))
        );
        assert!(Amount::try_from(Decimal::new(0, 2)).is_err());
    }

    #[test]
    fn positive_keeps_value() {
        let a = Amount::try_from(dec!(12.50)).unwrap();
        assert_eq!(*a, dec!(12.5));
        assert_eq!(Amount::try_from(Decimal::new(1250, 2)).unwrap(), a);
        assert_eq!(Amount::try_from(Decimal::MAX).map(Decimal::from), Ok(Decimal::MAX));
    }
}
