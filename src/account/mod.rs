//! Account traits and structs
use crate::errors::AccountErr;
use rust_decimal::Decimal;
use std::fmt::Write;

pub(crate) mod balance;
pub(crate) mod savings_account;
pub(crate) mod standard_account;
pub mod transactions;

pub use savings_account::{SavingsAccount, SavingsPolicy};
pub use standard_account::StandardAccount;
pub use transactions::{TransKind, Transaction};

/// Capabilities shared by every kind of account.
///
/// Every mutating operation either succeeds completely or returns error leaving balance and
/// history untouched.
pub trait Account {
    /// unique identifier assigned at creation
    fn number(&self) -> &str;
    /// name of account owner
    fn owner(&self) -> &str;
    /// current balance, never negative
    fn balance(&self) -> Decimal;
    /// recorded transactions in chronological order
    fn history(&self) -> &[Transaction];
    /// short name of the account kind
    fn kind(&self) -> &'static str;

    /// Add `amount` to the balance and record a deposit.
    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountErr>;

    /// Take `amount` out of the account following the account policy.
    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountErr>;

    /// Replay `t` against the balance according to its kind and record it.
    ///
    /// Debits that exceed the balance are refused and not recorded.
    fn apply_transaction(&mut self, t: Transaction) -> Result<&mut Self, AccountErr>
    where
        Self: Sized;

    /// Single account summary
    fn describe(&self) -> String;

    /// Listing of every recorded transaction
    fn history_report(&self) -> String {
        let mut out = format!("Transaction history for account {}:\n", self.number());
        if self.history().is_empty() {
            out.push_str("  (no transactions)\n");
            return out;
        }
        for t in self.history() {
            let _ = writeln!(out, "  {t}");
        }
        out
    }
}

/// Any account held by a bank
#[derive(Debug, Clone)]
pub enum AnyAccount {
    #[allow(missing_docs)]
    Standard(StandardAccount),
    #[allow(missing_docs)]
    Savings(SavingsAccount),
}

impl AnyAccount {
    /// `Some` when it is savings account
    pub fn as_savings_mut(&mut self) -> Option<&mut SavingsAccount> {
        match self {
            AnyAccount::Savings(s) => Some(s),
            AnyAccount::Standard(_) => None,
        }
    }

    /// Append `t` to history without any balance effect. Only bank transfers write audit entries.
    pub(crate) fn record_audit(&mut self, t: Transaction) {
        match self {
            AnyAccount::Standard(a) => a.record_audit(t),
            AnyAccount::Savings(s) => s.record_audit(t),
        }
    }

    fn inner(&self) -> &dyn Account {
        match self {
            AnyAccount::Standard(a) => a,
            AnyAccount::Savings(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Account {
        match self {
            AnyAccount::Standard(a) => a,
            AnyAccount::Savings(s) => s,
        }
    }
}

impl From<StandardAccount> for AnyAccount {
    fn from(a: StandardAccount) -> Self {
        AnyAccount::Standard(a)
    }
}

impl From<SavingsAccount> for AnyAccount {
    fn from(s: SavingsAccount) -> Self {
        AnyAccount::Savings(s)
    }
}

impl Account for AnyAccount {
    fn number(&self) -> &str {
        self.inner().number()
    }

    fn owner(&self) -> &str {
        self.inner().owner()
    }

    fn balance(&self) -> Decimal {
        self.inner().balance()
    }

    fn history(&self) -> &[Transaction] {
        self.inner().history()
    }

    fn kind(&self) -> &'static str {
        self.inner().kind()
    }

    fn deposit(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        self.inner_mut().deposit(amount)
    }

    fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountErr> {
        self.inner_mut().withdraw(amount)
    }

    fn apply_transaction(&mut self, t: Transaction) -> Result<&mut Self, AccountErr> {
        match self {
            AnyAccount::Standard(a) => {
                a.apply_transaction(t)?;
            }
            AnyAccount::Savings(s) => {
                s.apply_transaction(t)?;
            }
        }
        Ok(self)
    }

    fn describe(&self) -> String {
        self.inner().describe()
    }
}

/// Accounts are equal when their balances are equal, identity is not compared.
impl PartialEq for AnyAccount {
    fn eq(&self, other: &Self) -> bool {
        self.balance() == other.balance()
    }
}

#[cfg(test)]
mod test {
    use super::{Account, AnyAccount, SavingsAccount, StandardAccount, TransKind, Transaction};
    use crate::clock::FixedClock;
    use rust_decimal_macros::dec;

    fn checking() -> AnyAccount {
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0).shared();
        StandardAccount::with_balance("ACC1", "Owner", dec!(100), clock)
            .unwrap()
            .into()
    }

    fn savings() -> AnyAccount {
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0).shared();
        SavingsAccount::new("SAV1", "Owner", dec!(100), dec!(0.02), clock)
            .unwrap()
            .into()
    }

    #[test]
    fn equality_compares_balance_only() {
        let mut a = checking();
        let mut s = savings();
        assert!(a == s);

        a.deposit(dec!(1)).unwrap();
        assert!(a != s);

        s.deposit(dec!(1)).unwrap();
        assert!(a == s);
    }

    #[test]
    fn dispatch_to_savings_policy() {
        let mut s = savings();
        for _ in 0..4 {
            s.withdraw(dec!(10)).unwrap();
        }
        // 4 principal entries and 1 fee
        assert_eq!(s.history().len(), 5);
        assert_eq!(s.balance(), dec!(58));
        assert_eq!(s.kind(), "savings");
    }

    #[test]
    fn chained_apply() {
        let mut a = checking();
        let clock = FixedClock::at(2025, 1, 1, 12, 0, 0);
        a.apply_transaction(Transaction::new(dec!(5), TransKind::Deposit, "a", &clock))
            .unwrap()
            .apply_transaction(Transaction::new(dec!(3), TransKind::Withdrawal, "b", &clock))
            .unwrap();
        assert_eq!(a.balance(), dec!(102));
        assert_eq!(a.history().len(), 2);
    }

    #[test]
    fn empty_history_report() {
        assert_eq!(
            checking().history_report(),
            "Transaction history for account ACC1:\n  (no transactions)\n"
        );
    }
}
