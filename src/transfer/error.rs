//! Transfer engine error types

use thiserror::Error;

use crate::money::MoneyError;

/// Transfer engine errors
///
/// Variant order mirrors the order the engine checks preconditions in.
#[derive(Error, Debug)]
pub enum LedgerError {
    // === Validation ===
    #[error("missing destination account for transfer")]
    MissingDestination,

    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),

    #[error("cannot transfer to self")]
    SelfTransfer,

    // === Not found ===
    #[error("sender account not found")]
    SenderNotFound,

    #[error("receiver account not found")]
    ReceiverNotFound,

    // === Conflict ===
    #[error("both accounts must be active")]
    AccountInactive,

    #[error("insufficient balance")]
    InsufficientBalance,

    // === Storage ===
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LedgerError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            LedgerError::MissingDestination => "MISSING_DESTINATION",
            LedgerError::InvalidAmount(_) => "INVALID_AMOUNT",
            LedgerError::SelfTransfer => "SELF_TRANSFER",
            LedgerError::SenderNotFound => "SENDER_NOT_FOUND",
            LedgerError::ReceiverNotFound => "RECEIVER_NOT_FOUND",
            LedgerError::AccountInactive => "ACCOUNT_INACTIVE",
            LedgerError::InsufficientBalance => "INSUFFICIENT_BALANCE",
            LedgerError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::MissingDestination.to_string(),
            "missing destination account for transfer"
        );
        assert_eq!(LedgerError::SelfTransfer.to_string(), "cannot transfer to self");
        assert_eq!(
            LedgerError::SenderNotFound.to_string(),
            "sender account not found"
        );
        assert_eq!(
            LedgerError::ReceiverNotFound.to_string(),
            "receiver account not found"
        );
        assert_eq!(
            LedgerError::AccountInactive.to_string(),
            "both accounts must be active"
        );
        assert_eq!(
            LedgerError::InsufficientBalance.to_string(),
            "insufficient balance"
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(LedgerError::InsufficientBalance.code(), "INSUFFICIENT_BALANCE");
        assert_eq!(LedgerError::SelfTransfer.code(), "SELF_TRANSFER");
        assert_eq!(
            LedgerError::InvalidAmount(MoneyError::NonPositive).code(),
            "INVALID_AMOUNT"
        );
    }
}
