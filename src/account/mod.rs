//! Bank account access
//!
//! Accounts are created and administered by the external account-management
//! service. The core only reads them and adjusts balances inside transfer
//! transactions.

pub mod models;
pub mod store;

pub use models::Account;
pub use store::AccountStore;
