use super::standard_account::StandardAccount;
use super::transactions::{TransKind, Transaction};
use super::Account;
use crate::{amount::Amount, clock::SharedClock, errors::AccountErr, AccountNumber};
use log::info;
use rust_decimal::Decimal;

/// Free withdrawals and the fee charged after they are used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingsPolicy {
    /// number of withdrawals per period without fee
    pub free_withdrawals: u32,
    /// flat fee for every withdrawal over the limit
    pub fee: Decimal,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            free_withdrawals: 3,
            fee: Decimal::new(20, 1),
        }
    }
}

/// Interest earning account with limited number of free withdrawals per period.
///
/// Period is never reset automatically, somebody has to call [`SavingsAccount::reset_period`].
#[derive(Debug, Clone)]
pub struct SavingsAccount {
    base: StandardAccount,
    interest_rate: Decimal,
    policy: SavingsPolicy,
    withdrawals_this_period: u32,
}

impl SavingsAccount {
    /// Savings account with default [`SavingsPolicy`]
    pub fn new(
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        initial: Decimal,
        interest_rate: Decimal,
        clock: SharedClock,
    ) -> Result<Self, AccountErr> {
        Self::with_policy(number, owner, initial, interest_rate, SavingsPolicy::default(), clock)
    }

    #[allow(missing_docs)]
    pub fn with_policy(
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        initial: Decimal,
        interest_rate: Decimal,
        policy: SavingsPolicy,
        clock: SharedClock,
    ) -> Result<Self, AccountErr> {
        Ok(Self {
            base: StandardAccount::with_balance(number, owner, initial, clock)?,
            interest_rate,
            policy,
            withdrawals_this_period: 0,
        })
    }

    #[allow(missing_docs)]
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    #[allow(missing_docs)]
    pub fn set_interest_rate(&mut self, rate: Decimal) {
        self.interest_rate = rate;
    }

    #[allow(missing_docs)]
    pub fn policy(&self) -> &SavingsPolicy {
        &self.policy
    }

    /// withdrawals made since last reset
    pub fn withdrawals_this_period(&self) -> u32 {
        self.withdrawals_this_period
    }

    /// Add `balance * rate` to the balance. Returns the interest, zero when rate is not positive.
    ///
    /// Balance is left untouched when the result does not fit in [`Decimal`].
    pub fn apply_interest(&mut self) -> Result<Decimal, AccountErr> {
        if self.interest_rate <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let interest = self
            .base
            .balance()
            .checked_mul(self.interest_rate)
            .ok_or(AccountErr::Overflow)
            .map_err(|e| self.base.rejected("interest", e))?;
        self.base
            .balance_mut()
            .deposit(&interest)
            .map_err(|e| self.base.rejected("interest", e))?;
        let t = self.base.stamp(interest, TransKind::Deposit, "Interest applied");
        self.base.push(t);
        info!("interest of {} applied to {}", interest, self.number());
        Ok(interest)
    }

    /// Append `t` to history without any balance effect
    pub(super) fn record_audit(&mut self, t: Transaction) {
        self.base.record_audit(t)
    }

    /// Start new period, free withdrawals are available again.
    pub fn reset_period(&mut self) {
        self.withdrawals_this_period = 0;
    }

    fn fee_for_next_withdrawal(&self) -> Decimal {
        if self.withdrawals_this_period >= self.policy.free_withdrawals {
            self.policy.fee
        } else {
            Decimal::ZERO
        }
    }
}

impl Account for SavingsAccount {
    fn number(&self) -> &str {
        self.base.number()
    }

    fn owner(&self) -> &str {
        self.base.owner()
    }

    fn balance(&self) -> Decimal {
        self.base.balance()
    }

    fn history(&self) -> &[Transaction] {
        self.base.history()
    }

    fn kind(&self) -> &'static str {
        "savings"
    }

    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        self.base.deposit(amount)
    }

    /// Withdraw `amount` plus fee when free withdrawals are used up.
    ///
    /// Fee is recorded as separate withdrawal entry.
    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        let amount = Amount::try_from(amount)
            .map_err(|e| self.base.rejected("withdraw", e.into()))?;

        let fee = self.fee_for_next_withdrawal();
        let total = amount
            .checked_add(fee)
            .ok_or(AccountErr::Overflow)
            .map_err(|e| self.base.rejected("withdraw", e))?;
        self.base
            .balance_mut()
            .try_withdraw(&total)
            .map_err(|e| self.base.rejected("withdraw", e))?;
        self.withdrawals_this_period += 1;

        let principal = self.base.stamp(
            *amount,
            TransKind::Withdrawal,
            format!("Withdrawal (fee: {:.2})", fee.round_dp(2)),
        );
        self.base.push(principal);
        if fee > Decimal::ZERO {
            let fee_entry = self.base.stamp(fee, TransKind::Withdrawal, "Withdrawal fee");
            self.base.push(fee_entry);
        }
        Ok(())
    }

    fn apply_transaction(&mut self, t: Transaction) -> Result<&mut Self, AccountErr> {
        self.base.apply_transaction(t)?;
        Ok(self)
    }

    fn describe(&self) -> String {
        format!(
            "Savings {}\n   Interest rate: {} | Withdrawals this period: {}",
            self.base.describe(),
            self.interest_rate,
            self.withdrawals_this_period
        )
    }
}

/// Accounts are equal when their balances are equal, identity is not compared.
impl PartialEq for SavingsAccount {
    fn eq(&self, other: &Self) -> bool {
        self.balance() == other.balance()
    }
}
