//! Durable notification store
//!
//! `insert` takes any executor so producers can write the row inside
//! their own financial transaction; the row then commits or rolls back
//! with the money movement it describes.

use sqlx::{PgExecutor, PgPool};

use super::models::{Notification, NotificationCategory, NotificationFilter};

pub struct NotificationStore;

impl NotificationStore {
    /// Insert one notification row on the caller's executor.
    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        user_id: i64,
        message: &str,
        category: NotificationCategory,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "INSERT INTO notifications (user_id, message, category)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(message)
        .bind(category.as_str())
        .fetch_one(executor)
        .await
    }

    /// List a user's notifications, newest first, optionally narrowed to
    /// one category.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: i64,
        filter: NotificationFilter,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let category = match filter {
            NotificationFilter::All => None,
            NotificationFilter::Requests => Some(NotificationCategory::Request.as_str()),
            NotificationFilter::Alert => Some(NotificationCategory::Alert.as_str()),
        };

        sqlx::query_as::<_, Notification>(
            "SELECT id, user_id, message, category, is_read, created_at
             FROM notifications
             WHERE user_id = $1 AND ($2::varchar IS NULL OR category = $2)
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .bind(category)
        .fetch_all(pool)
        .await
    }
}
