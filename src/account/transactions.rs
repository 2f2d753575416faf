//! Represents transactions
use crate::clock::Clock;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use std::fmt;

/// Format used for transaction timestamps in reports
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One balance affecting event recorded in account history.
///
/// Nothing is validated here, account operations decide if amount is acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    amount: Decimal,
    kind: TransKind,
    timestamp: NaiveDateTime,
    note: String,
}

impl Transaction {
    /// Create transaction stamped with current time of `clock`
    pub fn new(
        amount: Decimal,
        kind: TransKind,
        note: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self::at(amount, kind, note, clock.now())
    }

    /// Create transaction with explicit timestamp
    pub fn at(
        amount: Decimal,
        kind: TransKind,
        note: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            amount,
            kind,
            timestamp,
            note: note.into(),
        }
    }

    #[allow(missing_docs)]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    #[allow(missing_docs)]
    pub fn kind(&self) -> TransKind {
        self.kind
    }

    #[allow(missing_docs)]
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    #[allow(missing_docs)]
    pub fn note(&self) -> &str {
        &self.note
    }
}

impl fmt::Display for Transaction {
    /// single history line: `[timestamp] kind amount -- note`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<12}  {:>8}  -- {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind.label(),
            format!("{:.2}", self.amount.round_dp(2)),
            self.note
        )
    }
}

/// What the transaction did to the balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransKind {
    /// increase balance
    Deposit,
    /// decrease balance
    Withdrawal,
    /// incoming side of transfer
    TransferIn,
    /// outgoing side of transfer
    TransferOut,
}

impl TransKind {
    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            TransKind::Deposit => "Deposit",
            TransKind::Withdrawal => "Withdrawal",
            TransKind::TransferIn => "Transfer In",
            TransKind::TransferOut => "Transfer Out",
        }
    }

    /// `true` for kinds that take money out of the account
    pub fn is_debit(&self) -> bool {
        matches!(self, TransKind::Withdrawal | TransKind::TransferOut)
    }
}

#[cfg(test)]
mod test {
    use super::{TransKind, Transaction};
    use crate::clock::FixedClock;
    use rust_decimal_macros::dec;

    #[test]
    fn labels() {
        assert_eq!(TransKind::Deposit.label(), "Deposit");
        assert_eq!(TransKind::Withdrawal.label(), "Withdrawal");
        assert_eq!(TransKind::TransferIn.label(), "Transfer In");
        assert_eq!(TransKind::TransferOut.label(), "Transfer Out");
    }

    #[test]
    fn stamped_by_clock_and_rendered() {
        let clock = FixedClock::at(2025, 3, 1, 9, 30, 0);
        let t = Transaction::new(dec!(150), TransKind::Deposit, "Manual deposit", &clock);

        assert_eq!(t.timestamp(), clock.0);
        assert_eq!(
            t.to_string(),
            "[2025-03-01 09:30:00] Deposit         150.00  -- Manual deposit"
        );
    }

    #[test]
    fn no_validation_on_construction() {
        let clock = FixedClock::at(2025, 3, 1, 9, 30, 0);
        let t = Transaction::new(dec!(-5), TransKind::Withdrawal, "", &clock);
        assert_eq!(t.amount(), dec!(-5));
    }
}
