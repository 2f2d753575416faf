//! Arena of accounts and operations spanning more than one account

use crate::{
    account::{
        Account, AnyAccount, SavingsAccount, SavingsPolicy, StandardAccount, TransKind,
        Transaction,
    },
    amount::Amount,
    clock::{system_clock, SharedClock},
    csv::{RawOperation, RawOperationType},
    errors::{AccountErr, BankErr},
    AccountNumber,
};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Owns every account, keyed by account number.
///
/// Customers and reports refer to accounts by number only.
#[derive(Debug)]
pub struct Bank {
    accounts: BTreeMap<AccountNumber, AnyAccount>,
    clock: SharedClock,
}

impl Default for Bank {
    fn default() -> Self {
        Self::new()
    }
}

impl Bank {
    /// Bank using local wall clock
    pub fn new() -> Self {
        Self::with_clock(system_clock())
    }

    /// Bank that stamps every transaction with `clock`
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            accounts: BTreeMap::new(),
            clock,
        }
    }

    /// Open [`StandardAccount`] with opening balance
    pub fn open_standard(
        &mut self,
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        initial: Decimal,
    ) -> Result<&mut AnyAccount, BankErr> {
        let number = number.into();
        self.check_free(&number)?;
        let acc = StandardAccount::with_balance(number, owner, initial, self.clock.clone())?;
        self.insert(acc)
    }

    /// Open [`SavingsAccount`] with opening balance
    pub fn open_savings(
        &mut self,
        number: impl Into<AccountNumber>,
        owner: impl Into<String>,
        initial: Decimal,
        interest_rate: Decimal,
        policy: SavingsPolicy,
    ) -> Result<&mut AnyAccount, BankErr> {
        let number = number.into();
        self.check_free(&number)?;
        let acc = SavingsAccount::with_policy(
            number,
            owner,
            initial,
            interest_rate,
            policy,
            self.clock.clone(),
        )?;
        self.insert(acc)
    }

    /// Take ownership of already built account
    pub fn insert(&mut self, account: impl Into<AnyAccount>) -> Result<&mut AnyAccount, BankErr> {
        let account = account.into();
        let number = account.number().to_owned();
        self.check_free(&number)?;
        debug!("opened {} account {}", account.kind(), number);
        Ok(self.accounts.entry(number).or_insert(account))
    }

    #[allow(missing_docs)]
    pub fn account(&self, number: &str) -> Result<&AnyAccount, BankErr> {
        self.accounts
            .get(number)
            .ok_or_else(|| missing_account(number))
    }

    #[allow(missing_docs)]
    pub fn account_mut(&mut self, number: &str) -> Result<&mut AnyAccount, BankErr> {
        self.accounts
            .get_mut(number)
            .ok_or_else(|| missing_account(number))
    }

    /// Accounts ordered by account number
    pub fn accounts(&self) -> impl Iterator<Item = &AnyAccount> {
        self.accounts.values()
    }

    /// Consume the bank, accounts are ordered by account number
    pub fn into_accounts(self) -> impl Iterator<Item = AnyAccount> {
        self.accounts.into_values()
    }

    #[allow(missing_docs)]
    pub fn deposit(&mut self, number: &str, amount: Decimal) -> Result<(), BankErr> {
        Ok(self.account_mut(number)?.deposit(amount)?)
    }

    #[allow(missing_docs)]
    pub fn withdraw(&mut self, number: &str, amount: Decimal) -> Result<(), BankErr> {
        Ok(self.account_mut(number)?.withdraw(amount)?)
    }

    /// Move `amount` from `from` to `to`.
    ///
    /// Withdrawal follows the policy of the source account, so a savings source may also pay
    /// its fee. Destination receives exactly `amount`. Afterwards both accounts get audit
    /// entries (`TransferOut` and `TransferIn`) naming the counterparty; those entries are
    /// history only and do not move money again. On error nothing is changed, including a
    /// destination balance that could not hold `amount`.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), BankErr> {
        let amount = Amount::try_from(amount).map_err(|e| {
            warn!("transfer {} -> {} rejected: {}", from, to, e);
            BankErr::from(e)
        })?;
        if self.account(to)?.balance().checked_add(*amount).is_none() {
            warn!("transfer {} -> {} rejected: {}", from, to, AccountErr::Overflow);
            return Err(AccountErr::Overflow.into());
        }

        let out_entry = Transaction::new(
            *amount,
            TransKind::TransferOut,
            format!("Transfer to {to}"),
            self.clock.as_ref(),
        );
        let in_entry = Transaction::new(
            *amount,
            TransKind::TransferIn,
            format!("Transfer from {from}"),
            self.clock.as_ref(),
        );

        let source = self.account_mut(from)?;
        if let Err(e) = source.withdraw(*amount) {
            warn!("transfer {} -> {} failed: withdrawal from source failed", from, to);
            return Err(e.into());
        }
        source.record_audit(out_entry);

        let destination = self.account_mut(to)?;
        destination.deposit(*amount)?;
        destination.record_audit(in_entry);

        info!("transferred {} from {} to {}", *amount, from, to);
        Ok(())
    }

    /// Apply interest on savings account, returns the interest
    pub fn apply_interest(&mut self, number: &str) -> Result<Decimal, BankErr> {
        Ok(self.savings_mut(number)?.apply_interest()?)
    }

    /// Start new withdrawal period on savings account
    pub fn reset_period(&mut self, number: &str) -> Result<(), BankErr> {
        self.savings_mut(number)?.reset_period();
        Ok(())
    }

    /// Apply single operation read from csv input
    pub fn try_apply_raw_operation(&mut self, op: RawOperation) -> Result<(), BankErr> {
        debug!("applying {:?}", op);
        let number = op.account.as_str();
        match op.r#type {
            RawOperationType::Open => {
                let owner = op.owner.ok_or(BankErr::MissingField("owner"))?;
                self.open_standard(number, owner, op.amount.unwrap_or_default())?;
            }
            RawOperationType::OpenSavings => {
                let owner = op.owner.ok_or(BankErr::MissingField("owner"))?;
                let rate = op.rate.ok_or(BankErr::MissingField("rate"))?;
                self.open_savings(
                    number,
                    owner,
                    op.amount.unwrap_or_default(),
                    rate,
                    SavingsPolicy::default(),
                )?;
            }
            RawOperationType::Deposit => {
                self.deposit(number, op.amount.ok_or(BankErr::MissingField("amount"))?)?
            }
            RawOperationType::Withdraw => {
                self.withdraw(number, op.amount.ok_or(BankErr::MissingField("amount"))?)?
            }
            RawOperationType::Transfer => {
                let target = op.target.as_deref().ok_or(BankErr::MissingField("target"))?;
                let amount = op.amount.ok_or(BankErr::MissingField("amount"))?;
                self.transfer(number, target, amount)?
            }
            RawOperationType::Interest => {
                self.apply_interest(number)?;
            }
            RawOperationType::ResetPeriod => self.reset_period(number)?,
        }
        Ok(())
    }

    fn savings_mut(&mut self, number: &str) -> Result<&mut SavingsAccount, BankErr> {
        self.account_mut(number)?.as_savings_mut().ok_or_else(|| {
            warn!("account {}: not a savings account", number);
            BankErr::NotSavings(number.to_owned())
        })
    }

    fn check_free(&self, number: &str) -> Result<(), BankErr> {
        if self.accounts.contains_key(number) {
            warn!("account {}: already exists", number);
            return Err(BankErr::DuplicateAccount(number.to_owned()));
        }
        Ok(())
    }
}

fn missing_account(number: &str) -> BankErr {
    warn!("account {}: not found", number);
    BankErr::AccountNotFound(number.to_owned())
}

#[cfg(test)]
mod test {
    use super::Bank;
    use crate::account::{Account, SavingsPolicy, StandardAccount, TransKind};
    use crate::amount::NonPositiveAmountErr;
    use crate::clock::FixedClock;
    use crate::csv::{RawOperation, RawOperationType};
    use crate::errors::{AccountErr, BankErr};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn new_test_bank() -> Bank {
        let mut bank = Bank::with_clock(FixedClock::at(2025, 2, 1, 10, 0, 0).shared());
        bank.open_standard("ACC1001", "Owner", dec!(500)).unwrap();
        bank.open_savings("SAV2001", "Owner", dec!(1000), dec!(0.02), SavingsPolicy::default())
            .unwrap();
        bank
    }

    fn balance(bank: &Bank, number: &str) -> Decimal {
        bank.account(number).unwrap().balance()
    }

    fn entries(bank: &Bank, number: &str) -> usize {
        bank.account(number).unwrap().history().len()
    }

    #[test]
    fn transfer_from_savings_with_free_withdrawal() {
        let mut bank = new_test_bank();

        bank.transfer("SAV2001", "ACC1001", dec!(100)).unwrap();

        assert_eq!(balance(&bank, "ACC1001"), dec!(600));
        assert_eq!(balance(&bank, "SAV2001"), dec!(900));

        let checking = bank.account("ACC1001").unwrap().history();
        assert_eq!(checking.len(), 2);
        assert_eq!(checking[0].kind(), TransKind::Deposit);
        assert_eq!(checking[1].kind(), TransKind::TransferIn);
        assert_eq!(checking[1].note(), "Transfer from SAV2001");

        let savings = bank.account("SAV2001").unwrap().history();
        assert_eq!(savings.len(), 2);
        assert_eq!(savings[0].kind(), TransKind::Withdrawal);
        assert_eq!(savings[1].kind(), TransKind::TransferOut);
        assert_eq!(savings[1].note(), "Transfer to ACC1001");
    }

    #[test]
    fn transfer_applies_source_fee_but_deposits_principal() {
        let mut bank = new_test_bank();
        for _ in 0..3 {
            bank.withdraw("SAV2001", dec!(50)).unwrap();
        }

        bank.transfer("SAV2001", "ACC1001", dec!(100)).unwrap();

        assert_eq!(balance(&bank, "SAV2001"), dec!(748));
        assert_eq!(balance(&bank, "ACC1001"), dec!(600));
        // 3 withdrawals, principal, fee, audit
        assert_eq!(entries(&bank, "SAV2001"), 6);
    }

    #[test]
    fn transfer_failures_leave_both_accounts_untouched() {
        let mut bank = new_test_bank();

        assert_eq!(
            bank.transfer("ACC1001", "SAV2001", dec!(500.01)),
            Err(BankErr::Account(AccountErr::InsufficientFunds {
                needed: dec!(500.01),
                available: dec!(500)
            }))
        );
        assert_eq!(
            bank.transfer("ACC1001", "NOPE", dec!(1)),
            Err(BankErr::AccountNotFound("NOPE".to_owned()))
        );
        assert_eq!(
            bank.transfer("NOPE", "ACC1001", dec!(1)),
            Err(BankErr::AccountNotFound("NOPE".to_owned()))
        );
        assert_eq!(
            bank.transfer("ACC1001", "SAV2001", dec!(0)),
            Err(BankErr::Account(AccountErr::InvalidAmount(NonPositiveAmountErr(
                Decimal::ZERO
            ))))
        );

        assert_eq!(balance(&bank, "ACC1001"), dec!(500));
        assert_eq!(balance(&bank, "SAV2001"), dec!(1000));
        assert_eq!(entries(&bank, "ACC1001"), 0);
        assert_eq!(entries(&bank, "SAV2001"), 0);
    }

    #[test]
    fn transfer_into_full_account_is_refused_before_withdrawal() {
        let mut bank = new_test_bank();
        bank.open_standard("FULL", "Owner", Decimal::MAX).unwrap();

        assert_eq!(
            bank.transfer("ACC1001", "FULL", dec!(1)),
            Err(BankErr::Account(AccountErr::Overflow))
        );
        assert_eq!(
            bank.deposit("FULL", dec!(1)),
            Err(BankErr::Account(AccountErr::Overflow))
        );
        assert_eq!(balance(&bank, "ACC1001"), dec!(500));
        assert_eq!(balance(&bank, "FULL"), Decimal::MAX);
        assert_eq!(entries(&bank, "ACC1001"), 0);
        assert_eq!(entries(&bank, "FULL"), 0);
    }

    #[test]
    fn balances_stay_non_negative() {
        let mut bank = new_test_bank();
        let ops = [
            ("ACC1001", "SAV2001", dec!(499)),
            ("ACC1001", "SAV2001", dec!(2)),
            ("SAV2001", "ACC1001", dec!(1499)),
            ("SAV2001", "ACC1001", dec!(1)),
            ("ACC1001", "SAV2001", dec!(1500)),
        ];
        for (from, to, amount) in ops {
            let _ = bank.transfer(from, to, amount);
            let _ = bank.withdraw(from, dec!(0.5));
            assert!(bank.accounts().all(|a| a.balance() >= Decimal::ZERO));
        }
        let total: Decimal = bank.accounts().map(|a| a.balance()).sum();
        assert!(total <= dec!(1500));
    }

    #[test]
    fn duplicate_account_number_is_rejected() {
        let mut bank = new_test_bank();
        let e = bank.open_standard("ACC1001", "Other", dec!(1)).unwrap_err();
        assert_eq!(e, BankErr::DuplicateAccount("ACC1001".to_owned()));

        let clock = FixedClock::at(2025, 2, 1, 10, 0, 0).shared();
        let e = bank
            .insert(StandardAccount::new("SAV2001", "Other", clock))
            .unwrap_err();
        assert_eq!(e, BankErr::DuplicateAccount("SAV2001".to_owned()));
        assert_eq!(bank.account("ACC1001").unwrap().owner(), "Owner");
    }

    #[test]
    fn savings_only_operations() {
        let mut bank = new_test_bank();
        assert_eq!(
            bank.apply_interest("ACC1001"),
            Err(BankErr::NotSavings("ACC1001".to_owned()))
        );
        assert_eq!(
            bank.reset_period("ACC1001"),
            Err(BankErr::NotSavings("ACC1001".to_owned()))
        );
        assert_eq!(bank.apply_interest("SAV2001"), Ok(dec!(20)));
        assert_eq!(balance(&bank, "SAV2001"), dec!(1020));
    }

    #[test]
    fn raw_operations() {
        let mut bank = Bank::with_clock(FixedClock::at(2025, 2, 1, 10, 0, 0).shared());
        let op = |r#type, account: &str, amount: Option<Decimal>| RawOperation {
            r#type,
            account: account.to_owned(),
            owner: Some("Owner".to_owned()),
            amount,
            target: None,
            rate: None,
        };

        bank.try_apply_raw_operation(op(RawOperationType::Open, "A", Some(dec!(10))))
            .unwrap();
        bank.try_apply_raw_operation(op(RawOperationType::Deposit, "A", Some(dec!(5))))
            .unwrap();
        assert_eq!(
            bank.try_apply_raw_operation(op(RawOperationType::Withdraw, "A", None)),
            Err(BankErr::MissingField("amount"))
        );
        assert_eq!(
            bank.try_apply_raw_operation(op(RawOperationType::OpenSavings, "S", None)),
            Err(BankErr::MissingField("rate"))
        );
        assert_eq!(
            bank.try_apply_raw_operation(op(RawOperationType::Transfer, "A", Some(dec!(1)))),
            Err(BankErr::MissingField("target"))
        );
        assert_eq!(balance(&bank, "A"), dec!(15));

        bank.try_apply_raw_operation(op(RawOperationType::Open, "MAX", Some(Decimal::MAX)))
            .unwrap();
        assert_eq!(
            bank.try_apply_raw_operation(op(RawOperationType::Deposit, "MAX", Some(dec!(1)))),
            Err(BankErr::Account(AccountErr::Overflow))
        );
        assert_eq!(balance(&bank, "MAX"), Decimal::MAX);
    }
}
