//! Data models for bank accounts

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// A bank account row
///
/// `balance` is DECIMAL(15,2) in storage; it never goes negative because
/// the transfer engine checks funds under a row lock before debiting.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Account {
    pub id: i64,
    pub user_id: i64,
    pub account_number: String,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
