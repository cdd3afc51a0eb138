//! Money request error types

use thiserror::Error;

use crate::money::MoneyError;
use crate::transfer::LedgerError;

/// Errors from the money request lifecycle
#[derive(Error, Debug)]
pub enum RequestError {
    // === Validation ===
    #[error(transparent)]
    InvalidAmount(#[from] MoneyError),

    #[error("cannot request from self")]
    SelfRequest,

    // === Not found ===
    #[error("requester account not found")]
    RequesterNotFound,

    #[error("recipient account not found")]
    RecipientNotFound,

    #[error("money request not found")]
    RequestNotFound,

    // === Conflict ===
    #[error("request is no longer active")]
    RequestNotActive,

    // === Settlement ===
    #[error("settlement failed: {0}")]
    SettlementFailed(#[source] LedgerError),

    // === Storage ===
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl RequestError {
    /// Stable error code for logs and API payloads
    pub fn code(&self) -> &'static str {
        match self {
            RequestError::InvalidAmount(_) => "INVALID_AMOUNT",
            RequestError::SelfRequest => "SELF_REQUEST",
            RequestError::RequesterNotFound => "REQUESTER_NOT_FOUND",
            RequestError::RecipientNotFound => "RECIPIENT_NOT_FOUND",
            RequestError::RequestNotFound => "REQUEST_NOT_FOUND",
            RequestError::RequestNotActive => "REQUEST_NOT_ACTIVE",
            RequestError::SettlementFailed(_) => "SETTLEMENT_FAILED",
            RequestError::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RequestError::SelfRequest.to_string(),
            "cannot request from self"
        );
        assert_eq!(
            RequestError::RecipientNotFound.to_string(),
            "recipient account not found"
        );
        assert_eq!(
            RequestError::RequestNotActive.to_string(),
            "request is no longer active"
        );
        assert_eq!(
            RequestError::InvalidAmount(MoneyError::NonPositive).to_string(),
            "amount must be greater than zero"
        );
    }

    #[test]
    fn test_settlement_failure_wraps_ledger_error() {
        let err = RequestError::SettlementFailed(LedgerError::InsufficientBalance);
        assert_eq!(err.to_string(), "settlement failed: insufficient balance");
        assert_eq!(err.code(), "SETTLEMENT_FAILED");
    }

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(RequestError::SelfRequest.code(), "SELF_REQUEST");
        assert_eq!(RequestError::RequesterNotFound.code(), "REQUESTER_NOT_FOUND");
        assert_eq!(RequestError::RecipientNotFound.code(), "RECIPIENT_NOT_FOUND");
        assert_eq!(RequestError::RequestNotFound.code(), "REQUEST_NOT_FOUND");
        assert_eq!(RequestError::RequestNotActive.code(), "REQUEST_NOT_ACTIVE");
    }
}
