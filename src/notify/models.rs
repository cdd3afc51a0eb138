//! Notification types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a notification was created
///
/// Stored next to the message so list filters match on a tag instead of
/// scanning message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCategory {
    /// Funds arrived (receiver side of a transfer)
    Transfer,
    /// Someone requested money from this user
    Request,
    /// This user's money request was declined or expired
    Alert,
}

impl NotificationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationCategory::Transfer => "TRANSFER",
            NotificationCategory::Request => "REQUEST",
            NotificationCategory::Alert => "ALERT",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRANSFER" => Some(NotificationCategory::Transfer),
            "REQUEST" => Some(NotificationCategory::Request),
            "ALERT" => Some(NotificationCategory::Alert),
            _ => None,
        }
    }
}

impl fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A durable notification row
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub message: String,
    pub category: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// List filter over the category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFilter {
    All,
    Requests,
    Alert,
}

impl NotificationFilter {
    /// Parse the filter name used by the query surface; unknown names
    /// fall back to `All`.
    pub fn parse(s: &str) -> Self {
        match s {
            "requests" => NotificationFilter::Requests,
            "alert" => NotificationFilter::Alert,
            _ => NotificationFilter::All,
        }
    }
}

/// Outbound live push message
///
/// Wire format: `{"user_id":7,"message":"You received 40.00 from A001"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub user_id: i64,
    pub message: String,
}
