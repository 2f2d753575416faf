use crate::errors::AccountErr;
use rust_decimal::Decimal;

/// Represents current account balance. Never goes below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Balance {
    amount: Decimal,
}

impl Balance {
    pub fn opening(initial: Decimal) -> Result<Self, AccountErr> {
        if initial.is_sign_negative() && !initial.is_zero() {
            return Err(AccountErr::NegativeOpeningBalance);
        }
        Ok(Self { amount: initial })
    }

    pub fn deposit(&mut self, amount: &Decimal) -> Result<(), AccountErr> {
        self.amount = self
            .amount
            .checked_add(*amount)
            .ok_or(AccountErr::Overflow)?;
        Ok(())
    }

    pub fn try_withdraw(&mut self, amount: &Decimal) -> Result<(), AccountErr> {
        if self.amount < *amount {
            return Err(AccountErr::InsufficientFunds {
                needed: *amount,
                available: self.amount,
            });
        }

        self.amount = self
            .amount
            .checked_sub(*amount)
            .ok_or(AccountErr::Overflow)?;
        Ok(())
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

#[cfg(test)]
mod test {
    use super::Balance;
    use crate::errors::AccountErr;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn negative_opening_is_rejected() {
        assert_eq!(
            Balance::opening(dec!(-1)),
            Err(AccountErr::NegativeOpeningBalance)
        );
        assert_eq!(Balance::opening(dec!(0)).unwrap().amount(), dec!(0));
    }

    #[test]
    fn withdraw_whole_balance() {
        let mut b = Balance::opening(dec!(10)).unwrap();
        b.try_withdraw(&dec!(10)).unwrap();
        assert_eq!(b.amount(), dec!(0));

        let e = b.try_withdraw(&dec!(0.01)).unwrap_err();
        assert_eq!(
            e,
            AccountErr::InsufficientFunds {
                needed: dec!(0.01),
                available: dec!(0)
            }
        );
        assert_eq!(b.amount(), dec!(0));
    }

    #[test]
    fn deposit_over_max_is_refused() {
        let mut b = Balance::opening(Decimal::MAX).unwrap();
        assert_eq!(b.deposit(&dec!(1)), Err(AccountErr::Overflow));
        assert_eq!(b.amount(), Decimal::MAX);
    }
}
