use super::balance::Balance;
use super::transactions::{TransKind, Transaction};
use super::Account;
use crate::{amount::Amount, clock::SharedClock, errors::AccountErr, AccountNumber};
use log::warn;
use rust_decimal::Decimal;

/// Account with plain deposit and withdraw rules, no overdraft.
#[derive(Debug, Clone)]
pub struct StandardAccount {
    number: AccountNumber,
    owner: String,
    balance: Balance,
    history: Vec<Transaction>,
    clock: SharedClock,
}

impl StandardAccount {
    /// Create new empty account
    pub fn new(
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        clock: SharedClock,
    ) -> Self {
        Self {
            number: number.into(),
            owner: owner.into(),
            balance: Balance::default(),
            history: Vec::new(),
            clock,
        }
    }

    /// Create account with opening balance. Opening balance is not recorded as transaction.
    pub fn with_balance(
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        initial: Decimal,
        clock: SharedClock,
    ) -> Result<Self, AccountErr> {
        let mut acc = Self::new(number, owner, clock);
        let balance = Balance::opening(initial).map_err(|e| acc.rejected("open", e))?;
        acc.balance = balance;
        Ok(acc)
    }

    /// New transaction stamped with this account clock
    pub fn stamp(&self, amount: Decimal, kind: TransKind, note: impl Into<String>) -> Transaction {
        Transaction::new(amount, kind, note, self.clock.as_ref())
    }

    pub(super) fn balance_mut(&mut self) -> &mut Balance {
        &mut self.balance
    }

    pub(super) fn push(&mut self, t: Transaction) {
        self.history.push(t);
    }

    /// Append `t` to history without any balance effect
    pub(super) fn record_audit(&mut self, t: Transaction) {
        self.push(t);
    }

    /// log diagnostic for rejected operation and give back the error
    pub(super) fn rejected(&self, operation: &str, e: AccountErr) -> AccountErr {
        warn!("account {}: {} rejected: {}", self.number, operation, e);
        e
    }
}

impl Account for StandardAccount {
    fn number(&self) -> &str {
        &self.number
    }

    fn owner(&self) -> &str {
        &self.owner
    }

    fn balance(&self) -> Decimal {
        self.balance.amount()
    }

    fn history(&self) -> &[Transaction] {
        &self.history
    }

    fn kind(&self) -> &'static str {
        "standard"
    }

    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        let amount = Amount::try_from(amount).map_err(|e| self.rejected("deposit", e.into()))?;

        self.balance
            .deposit(&amount)
            .map_err(|e| self.rejected("deposit", e))?;
        let t = self.stamp(*amount, TransKind::Deposit, "Cash deposit");
        self.push(t);
        Ok(())
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        let amount = Amount::try_from(amount).map_err(|e| self.rejected("withdraw", e.into()))?;

        self.balance
            .try_withdraw(&amount)
            .map_err(|e| self.rejected("withdraw", e))?;
        let t = self.stamp(*amount, TransKind::Withdrawal, "Cash withdrawal");
        self.push(t);
        Ok(())
    }

    fn apply_transaction(&mut self, t: Transaction) -> Result<&mut Self, AccountErr> {
        let amount = Amount::try_from(t.amount())
            .map_err(|e| self.rejected(t.kind().label(), e.into()))?;

        if t.kind().is_debit() {
            self.balance
                .try_withdraw(&amount)
                .map_err(|e| self.rejected(t.kind().label(), e))?;
        } else {
            self.balance
                .deposit(&amount)
                .map_err(|e| self.rejected(t.kind().label(), e))?;
        }
        self.push(t);
        Ok(self)
    }

    fn describe(&self) -> String {
        format!(
            "Account Number: {} | Owner: {} | Balance: {:.2}",
            self.number,
            self.owner,
            self.balance().round_dp(2)
        )
    }
}

/// Accounts are equal when their balances are equal, identity is not compared.
impl PartialEq for StandardAccount {
    fn eq(&self, other: &Self) -> bool {
        self.balance == other.balance
    }
}
