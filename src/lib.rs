//! Toy bank accounting: accounts with transaction history, savings withdrawal policy,
//! transfers and customer portfolios.

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod bank;
pub mod clock;
pub mod csv;
pub mod customer;
pub mod errors;

pub use account::{Account, AnyAccount, SavingsAccount, SavingsPolicy, StandardAccount};
pub use bank::Bank;
pub use customer::Customer;

/// Account identifier. Unique within a [`Bank`]
pub type AccountNumber = String;
/// Customer identifier
pub type CustomerID = String;
