//! Transfer data models and the transaction history read model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use std::fmt;

/// Ledger entry direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Debit,
    Credit,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Debit => "DEBIT",
            TransactionKind::Credit => "CREDIT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "DEBIT" => Some(TransactionKind::Debit),
            "CREDIT" => Some(TransactionKind::Credit),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable ledger row
///
/// Every transfer writes exactly two: a DEBIT against the sender and a
/// CREDIT against the receiver, agreeing on amount and referencing each
/// other through `to_account_id`.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct TransactionRecord {
    pub id: i64,
    pub user_id: i64,
    pub account_id: String,
    pub transaction_type: String,
    pub to_account_id: Option<String>,
    pub amount: Decimal,
    pub transaction_date: DateTime<Utc>,
    pub description: Option<String>,
}

impl TransactionRecord {
    pub fn kind(&self) -> Option<TransactionKind> {
        TransactionKind::parse(&self.transaction_type)
    }
}

/// A transfer order handed to the engine
#[derive(Debug, Clone)]
pub struct TransferCommand {
    /// User who initiated the movement (stamped on both ledger rows)
    pub user_id: i64,
    /// Sender account number
    pub from_account: String,
    /// Receiver account number; absent fails before any storage access
    pub to_account: Option<String>,
    pub amount: Decimal,
    /// Overrides the default DEBIT row description when present
    pub description: Option<String>,
}

/// The reciprocal ledger pair a successful transfer produced
#[derive(Debug, Clone, Serialize)]
pub struct TransferOutcome {
    pub debit: TransactionRecord,
    pub credit: TransactionRecord,
}

/// Optional filters for the transaction history read model
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub user_id: Option<i64>,
    pub account_id: Option<String>,
    pub kind: Option<TransactionKind>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub description_like: Option<String>,
}

/// Transaction history matching the filter, newest first.
pub async fn list_transactions(
    pool: &PgPool,
    filter: &TransactionFilter,
) -> Result<Vec<TransactionRecord>, sqlx::Error> {
    let description_like = filter
        .description_like
        .as_ref()
        .map(|needle| format!("%{}%", needle));

    sqlx::query_as::<_, TransactionRecord>(
        "SELECT id, user_id, account_id, transaction_type, to_account_id,
                amount, transaction_date, description
         FROM transactions
         WHERE ($1::bigint IS NULL OR user_id = $1)
           AND ($2::varchar IS NULL OR account_id = $2)
           AND ($3::varchar IS NULL OR transaction_type = $3)
           AND ($4::numeric IS NULL OR amount >= $4)
           AND ($5::numeric IS NULL OR amount <= $5)
           AND ($6::timestamptz IS NULL OR transaction_date >= $6)
           AND ($7::timestamptz IS NULL OR transaction_date <= $7)
           AND ($8::text IS NULL OR description ILIKE $8)
         ORDER BY transaction_date DESC",
    )
    .bind(filter.user_id)
    .bind(filter.account_id.as_deref())
    .bind(filter.kind.map(|kind| kind.as_str()))
    .bind(filter.min_amount)
    .bind(filter.max_amount)
    .bind(filter.start_date)
    .bind(filter.end_date)
    .bind(description_like.as_deref())
    .fetch_all(pool)
    .await
}
