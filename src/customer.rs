//! Customer and the portfolio of accounts

use crate::{
    account::{Account, AnyAccount},
    bank::Bank,
    errors::AccountErr,
    AccountNumber, CustomerID,
};
use rust_decimal::Decimal;
use std::fmt::Write;

/// Customer holding references (account numbers) to accounts stored in a [`Bank`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    name: String,
    id: CustomerID,
    accounts: Vec<AccountNumber>,
}

impl Customer {
    #[allow(missing_docs)]
    pub fn new(name: impl Into<String>, id: impl Into<CustomerID>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            accounts: Vec::new(),
        }
    }

    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[allow(missing_docs)]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// account numbers in the order they were added
    pub fn account_numbers(&self) -> &[AccountNumber] {
        &self.accounts
    }

    /// Add account to the portfolio. Duplicates are not detected.
    pub fn add_account(&mut self, number: impl Into<AccountNumber>) {
        self.accounts.push(number.into());
    }

    /// First account of the portfolio with `number`
    pub fn find_account<'b>(&self, bank: &'b Bank, number: &str) -> Option<&'b AnyAccount> {
        self.accounts
            .iter()
            .find(|n| n.as_str() == number)
            .and_then(|n| bank.account(n).ok())
    }

    /// Sum of balances of all portfolio accounts, numbers unknown to `bank` are skipped.
    ///
    /// Fails with [`AccountErr::Overflow`] when the sum does not fit in [`Decimal`].
    pub fn total_balance(&self, bank: &Bank) -> Result<Decimal, AccountErr> {
        self.portfolio(bank)
            .try_fold(Decimal::ZERO, |sum, a| sum.checked_add(a.balance()))
            .ok_or(AccountErr::Overflow)
    }

    /// Customer identity, every account summary and the total
    pub fn display_portfolio(&self, bank: &Bank) -> String {
        let mut out = format!("Customer: {} (ID: {})\nAccounts:\n", self.name, self.id);
        for acc in self.portfolio(bank) {
            let _ = writeln!(out, "{}", acc.describe());
        }
        let _ = match self.total_balance(bank) {
            Ok(total) => writeln!(out, "Total balance across accounts: {:.2}", total.round_dp(2)),
            Err(e) => writeln!(out, "Total balance across accounts: {e}"),
        };
        out
    }

    fn portfolio<'b>(&'b self, bank: &'b Bank) -> impl Iterator<Item = &'b AnyAccount> {
        self.accounts.iter().filter_map(|n| bank.account(n).ok())
    }
}
