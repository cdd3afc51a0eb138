//! Transfer engine core
//!
//! Moves funds between two accounts inside a single database transaction:
//! lock both rows, check preconditions, move the balances, append the
//! DEBIT/CREDIT ledger pair and the receiver's durable notification, and
//! commit. Either all of it becomes visible or none of it does. The audit
//! trail and the live push run after commit and never affect the result.

use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};

use crate::account::AccountStore;
use crate::audit::AuditSink;
use crate::money;
use crate::notify::{Notice, NotificationCategory, NotificationStore, NotifyQueue};

use super::error::LedgerError;
use super::models::{TransactionKind, TransactionRecord, TransferCommand, TransferOutcome};

/// Atomic two-account transfer executor
#[derive(Clone)]
pub struct TransferEngine {
    pool: PgPool,
    notices: NotifyQueue,
}

impl TransferEngine {
    pub fn new(pool: PgPool, notices: NotifyQueue) -> Self {
        Self { pool, notices }
    }

    /// Execute one transfer.
    ///
    /// Precondition failures roll back the whole transaction without any
    /// partial effect. Preconditions are checked in a fixed order: missing
    /// destination, invalid amount, sender missing, receiver missing,
    /// self-transfer, inactive account, insufficient balance.
    pub async fn execute(&self, cmd: TransferCommand) -> Result<TransferOutcome, LedgerError> {
        let to_account = cmd
            .to_account
            .as_deref()
            .ok_or(LedgerError::MissingDestination)?;
        let amount = money::validate_amount(cmd.amount)?;

        let mut tx = self.pool.begin().await?;

        // Lock the two rows in lexicographic account-number order so
        // opposite-direction transfers cannot deadlock. Precondition
        // errors are still reported sender-first.
        let (sender, receiver) = if cmd.from_account.as_str() <= to_account {
            let sender = AccountStore::lock_by_number(&mut tx, &cmd.from_account).await?;
            let receiver = AccountStore::lock_by_number(&mut tx, to_account).await?;
            (sender, receiver)
        } else {
            let receiver = AccountStore::lock_by_number(&mut tx, to_account).await?;
            let sender = AccountStore::lock_by_number(&mut tx, &cmd.from_account).await?;
            (sender, receiver)
        };

        let sender = sender.ok_or(LedgerError::SenderNotFound)?;
        let receiver = receiver.ok_or(LedgerError::ReceiverNotFound)?;

        if sender.account_number == receiver.account_number {
            return Err(LedgerError::SelfTransfer);
        }
        if !sender.is_active || !receiver.is_active {
            return Err(LedgerError::AccountInactive);
        }
        if sender.balance < amount {
            return Err(LedgerError::InsufficientBalance);
        }

        AccountStore::adjust_balance(&mut *tx, &sender.account_number, -amount).await?;
        AccountStore::adjust_balance(&mut *tx, &receiver.account_number, amount).await?;

        let debit_description = cmd
            .description
            .clone()
            .unwrap_or_else(|| format!("Transferred to account {}", receiver.account_number));
        let credit_description = format!("Received from account {}", sender.account_number);

        let debit = insert_transaction(
            &mut tx,
            cmd.user_id,
            &sender.account_number,
            TransactionKind::Debit,
            Some(&receiver.account_number),
            amount,
            &debit_description,
        )
        .await?;

        let credit = insert_transaction(
            &mut tx,
            cmd.user_id,
            &receiver.account_number,
            TransactionKind::Credit,
            Some(&sender.account_number),
            amount,
            &credit_description,
        )
        .await?;

        // Durable copy of the receiver's notification rides the same commit
        let message = format!(
            "You received {} from {}",
            money::format_amount(amount),
            sender.account_number
        );
        NotificationStore::insert(
            &mut *tx,
            receiver.user_id,
            &message,
            NotificationCategory::Transfer,
        )
        .await?;

        tx.commit().await?;

        AuditSink::record(
            &self.pool,
            Some(sender.user_id),
            "CREATE",
            "transactions",
            debit.id,
            &format!(
                "Debited {} to {}",
                money::format_amount(amount),
                receiver.account_number
            ),
        )
        .await;
        AuditSink::record(
            &self.pool,
            Some(receiver.user_id),
            "CREATE",
            "transactions",
            credit.id,
            &format!(
                "Credited {} from {}",
                money::format_amount(amount),
                sender.account_number
            ),
        )
        .await;

        self.notices.push(Notice {
            user_id: receiver.user_id,
            message,
        });

        tracing::info!(
            from = %sender.account_number,
            to = %receiver.account_number,
            amount = %amount,
            debit_id = debit.id,
            credit_id = credit.id,
            "Transfer committed"
        );

        Ok(TransferOutcome { debit, credit })
    }
}

async fn insert_transaction(
    tx: &mut Transaction<'_, Postgres>,
    user_id: i64,
    account_id: &str,
    kind: TransactionKind,
    to_account_id: Option<&str>,
    amount: Decimal,
    description: &str,
) -> Result<TransactionRecord, sqlx::Error> {
    sqlx::query_as::<_, TransactionRecord>(
        "INSERT INTO transactions
             (user_id, account_id, transaction_type, to_account_id, amount, description)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, user_id, account_id, transaction_type, to_account_id,
                   amount, transaction_date, description",
    )
    .bind(user_id)
    .bind(account_id)
    .bind(kind.as_str())
    .bind(to_account_id)
    .bind(amount)
    .bind(description)
    .fetch_one(&mut **tx)
    .await
}
