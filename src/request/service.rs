//! Money request lifecycle service
//!
//! Requests move PENDING -> {ACCEPTED_PENDING_SETTLEMENT -> ACCEPTED,
//! DECLINED, EXPIRED}. Acceptance claims the request with a compare-and-set
//! before any money moves, so a responder racing the expiry sweep (or a
//! double-click) settles at most once.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use crate::account::AccountStore;
use crate::audit::AuditSink;
use crate::money;
use crate::notify::{Notice, NotificationCategory, NotificationStore, NotifyQueue};
use crate::transfer::{TransferCommand, TransferEngine, TransferOutcome};

use super::error::RequestError;
use super::models::{MoneyRequest, RequestCommand};
use super::status::RequestStatus;
use super::store::RequestStore;

/// Hours a request stays open before the sweep expires it
const REQUEST_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct RequestService {
    pool: PgPool,
    notices: NotifyQueue,
    engine: TransferEngine,
}

impl RequestService {
    pub fn new(pool: PgPool, notices: NotifyQueue, engine: TransferEngine) -> Self {
        Self {
            pool,
            notices,
            engine,
        }
    }

    /// Create a PENDING request addressed to the owner of the recipient
    /// account.
    ///
    /// The recipient's durable notification lands in the same transaction
    /// as the request row; the live push follows the commit.
    pub async fn create(&self, cmd: RequestCommand) -> Result<MoneyRequest, RequestError> {
        let amount = money::validate_amount(cmd.amount)?;
        if cmd.requester_account == cmd.recipient_account {
            return Err(RequestError::SelfRequest);
        }

        let mut tx = self.pool.begin().await?;

        let recipient_user_id = AccountStore::find_owner(&mut *tx, &cmd.recipient_account)
            .await?
            .ok_or(RequestError::RecipientNotFound)?;

        let expires_at = Utc::now() + Duration::hours(REQUEST_TTL_HOURS);
        let request = RequestStore::insert_pending(
            &mut *tx,
            cmd.user_id,
            &cmd.requester_account,
            &cmd.recipient_account,
            amount,
            expires_at,
            recipient_user_id,
        )
        .await?;

        let message = format!(
            "User {} requested {} from you",
            cmd.requester_account,
            money::format_amount(amount)
        );
        NotificationStore::insert(
            &mut *tx,
            recipient_user_id,
            &message,
            NotificationCategory::Request,
        )
        .await?;

        tx.commit().await?;

        AuditSink::record(
            &self.pool,
            None,
            "CREATE",
            "money_requests",
            request.id,
            &format!(
                "Money request of {} from {} to {}",
                money::format_amount(amount),
                cmd.requester_account,
                cmd.recipient_account
            ),
        )
        .await;

        self.notices.push(Notice {
            user_id: recipient_user_id,
            message,
        });

        tracing::info!(
            request_id = request.id,
            requester = %cmd.requester_account,
            recipient = %cmd.recipient_account,
            amount = %amount,
            "Money request created"
        );

        Ok(request)
    }

    /// Accept a request: claim it, settle via the transfer engine, then
    /// finalize.
    ///
    /// The claim moves PENDING to ACCEPTED_PENDING_SETTLEMENT before any
    /// money moves. A request stuck in that state marks a settlement that
    /// failed mid-flight; it can never settle twice.
    pub async fn accept(&self, request_id: i64) -> Result<TransferOutcome, RequestError> {
        let request = RequestStore::fetch(&self.pool, request_id)
            .await?
            .ok_or(RequestError::RequestNotFound)?;
        if request.state() != Some(RequestStatus::Pending) {
            return Err(RequestError::RequestNotActive);
        }

        let claimed = RequestStore::update_status_if(
            &self.pool,
            request_id,
            RequestStatus::Pending,
            RequestStatus::AcceptedPendingSettlement,
        )
        .await?;
        if !claimed {
            return Err(RequestError::RequestNotActive);
        }

        // Money moves from the recipient back to the requester. The ledger
        // rows carry the requester's user id, the same user who initiated
        // the request.
        let settlement = self
            .engine
            .execute(TransferCommand {
                user_id: request.user_id,
                from_account: request.recipient_id.clone(),
                to_account: Some(request.requester_id.clone()),
                amount: request.amount,
                description: Some(format!("Accepted request ID {}", request.id)),
            })
            .await;

        let outcome = match settlement {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    request_id,
                    error = %err,
                    "Settlement failed, request left in ACCEPTED_PENDING_SETTLEMENT"
                );
                return Err(RequestError::SettlementFailed(err));
            }
        };

        let finalized = RequestStore::update_status_if(
            &self.pool,
            request_id,
            RequestStatus::AcceptedPendingSettlement,
            RequestStatus::Accepted,
        )
        .await?;
        if !finalized {
            tracing::warn!(request_id, "Settled request was not in claimed state");
        }

        tracing::info!(request_id, "Money request accepted and settled");
        Ok(outcome)
    }

    /// Decline a request and alert the requester.
    pub async fn decline(&self, request_id: i64) -> Result<(), RequestError> {
        let request = RequestStore::fetch(&self.pool, request_id)
            .await?
            .ok_or(RequestError::RequestNotFound)?;
        if request.state() != Some(RequestStatus::Pending) {
            return Err(RequestError::RequestNotActive);
        }

        let mut tx = self.pool.begin().await?;

        let declined = RequestStore::update_status_if(
            &mut *tx,
            request_id,
            RequestStatus::Pending,
            RequestStatus::Declined,
        )
        .await?;
        if !declined {
            return Err(RequestError::RequestNotActive);
        }

        let requester_user_id = AccountStore::find_owner(&mut *tx, &request.requester_id)
            .await?
            .ok_or(RequestError::RequesterNotFound)?;

        let message = format!(
            "Your money request {} was declined",
            request.requester_id
        );
        NotificationStore::insert(
            &mut *tx,
            requester_user_id,
            &message,
            NotificationCategory::Alert,
        )
        .await?;

        tx.commit().await?;

        self.notices.push(Notice {
            user_id: requester_user_id,
            message,
        });

        tracing::info!(request_id, "Money request declined");
        Ok(())
    }

    /// All requests the user sent or received, newest first.
    pub async fn list(&self, user_id: i64) -> Result<Vec<MoneyRequest>, RequestError> {
        Ok(RequestStore::list_by_user(&self.pool, user_id).await?)
    }
}
