//! Money request row model and command types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::status::RequestStatus;

/// One money request row
///
/// `requester_id` and `recipient_id` are account numbers. `user_id` owns the
/// requesting account; `recipient_user_id` owns the account being asked to
/// pay. Both are denormalized so notifications and listings avoid joins.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MoneyRequest {
    pub id: i64,
    pub user_id: i64,
    pub requester_id: String,
    pub recipient_id: String,
    pub amount: Decimal,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub requested_at: DateTime<Utc>,
    pub recipient_user_id: i64,
}

impl MoneyRequest {
    /// Parse the stored status string, None for unknown values
    pub fn state(&self) -> Option<RequestStatus> {
        RequestStatus::parse(&self.status)
    }
}

/// Input for creating a money request
#[derive(Debug, Clone)]
pub struct RequestCommand {
    /// Owner of the requesting account
    pub user_id: i64,
    /// Account asking for money
    pub requester_account: String,
    /// Account being asked to pay
    pub recipient_account: String,
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample(status: &str) -> MoneyRequest {
        MoneyRequest {
            id: 1,
            user_id: 10,
            requester_id: "A001".to_string(),
            recipient_id: "A002".to_string(),
            amount: dec!(25.00),
            status: status.to_string(),
            expires_at: Utc::now(),
            requested_at: Utc::now(),
            recipient_user_id: 11,
        }
    }

    #[test]
    fn test_state_parses_stored_status() {
        assert_eq!(sample("PENDING").state(), Some(RequestStatus::Pending));
        assert_eq!(sample("EXPIRED").state(), Some(RequestStatus::Expired));
        assert_eq!(sample("garbage").state(), None);
    }
}
