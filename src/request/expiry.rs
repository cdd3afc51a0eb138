//! Pending request expiry sweep
//!
//! A background loop that moves overdue PENDING requests to EXPIRED and
//! alerts the requester. Each request gets its own transaction; one stuck
//! row never blocks the rest of the batch. The status compare-and-set makes
//! the sweep idempotent against responders racing it.

use std::time::Duration;

use sqlx::PgPool;

use crate::account::AccountStore;
use crate::config::ExpiryConfig;
use crate::notify::{Notice, NotificationCategory, NotificationStore, NotifyQueue};

use super::models::MoneyRequest;
use super::status::RequestStatus;
use super::store::RequestStore;

pub struct ExpiryWorker {
    pool: PgPool,
    notices: NotifyQueue,
    config: ExpiryConfig,
}

impl ExpiryWorker {
    pub fn new(pool: PgPool, notices: NotifyQueue, config: ExpiryConfig) -> Self {
        Self {
            pool,
            notices,
            config,
        }
    }

    /// Run the sweep loop forever. The first sweep fires immediately so a
    /// restart catches up on requests that came due while the service was
    /// down.
    pub async fn run(self) {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(self.config.sweep_interval_secs));
        loop {
            ticker.tick().await;
            match self.sweep().await {
                Ok(0) => {}
                Ok(expired) => tracing::info!(expired, "Expired overdue money requests"),
                Err(err) => tracing::error!(error = %err, "Expiry sweep failed"),
            }
        }
    }

    /// Expire one batch of overdue PENDING requests.
    ///
    /// Returns how many requests this sweep actually transitioned. Failures
    /// on individual requests are logged and skipped; the next sweep
    /// retries them.
    pub async fn sweep(&self) -> Result<usize, sqlx::Error> {
        let due = RequestStore::find_due(&self.pool, self.config.batch_size as i64).await?;
        let mut expired = 0;
        for request in due {
            match self.expire_one(&request).await {
                Ok(true) => expired += 1,
                // A responder won the race; nothing to do
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(
                        request_id = request.id,
                        error = %err,
                        "Failed to expire request"
                    );
                }
            }
        }
        Ok(expired)
    }

    /// Expire a single request in its own transaction.
    async fn expire_one(&self, request: &MoneyRequest) -> Result<bool, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let won = RequestStore::update_status_if(
            &mut *tx,
            request.id,
            RequestStatus::Pending,
            RequestStatus::Expired,
        )
        .await?;
        if !won {
            return Ok(false);
        }

        let Some(requester_user_id) =
            AccountStore::find_owner(&mut *tx, &request.requester_id).await?
        else {
            tx.rollback().await?;
            tracing::warn!(
                request_id = request.id,
                requester = %request.requester_id,
                "Requester account not found, leaving request for the next sweep"
            );
            return Ok(false);
        };

        let message = format!(
            "Your money request (Account {}) has expired",
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
        Ok(true)
    }
}
