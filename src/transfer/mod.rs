//! Transfer engine
//!
//! Atomic two-account fund movement. Every successful transfer debits the
//! sender, credits the receiver, and appends a reciprocal DEBIT/CREDIT
//! ledger pair plus the receiver's durable notification, all in one
//! database transaction.

pub mod engine;
pub mod error;
pub mod models;

#[cfg(test)]
mod integration_tests;

pub use engine::TransferEngine;
pub use error::LedgerError;
pub use models::{
    TransactionFilter, TransactionKind, TransactionRecord, TransferCommand, TransferOutcome,
    list_transactions,
};
