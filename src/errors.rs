//! Possible errors

use crate::{amount::NonPositiveAmountErr, AccountNumber};
use rust_decimal::Decimal;
use thiserror::Error;

/// Group all errors that can occurs when operating on a single account
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccountErr {
    #[error("invalid amount")]
    InvalidAmount(#[from] NonPositiveAmountErr),
    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: Decimal, available: Decimal },
    #[error("opening balance can not be negative")]
    NegativeOpeningBalance,
    #[error("amount out of representable range")]
    Overflow,
}

/// Group errors returned by bank level operations
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BankErr {
    #[error("account {0} not found")]
    AccountNotFound(AccountNumber),
    #[error("account {0} already exists")]
    DuplicateAccount(AccountNumber),
    #[error("account {0} is not a savings account")]
    NotSavings(AccountNumber),
    #[error("operation is missing field `{0}`")]
    MissingField(&'static str),
    #[error("account operation failed")]
    Account(#[from] AccountErr),
}

impl From<NonPositiveAmountErr> for BankErr {
    fn from(e: NonPositiveAmountErr) -> Self {
        BankErr::Account(e.into())
    }
}
