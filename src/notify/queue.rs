//! Bounded outbound notification queue
//!
//! Producers (transfer engine, request state machine, expiry worker) hand
//! committed notices to the dispatcher through this queue without ever
//! blocking. Overflow policy: the new notice is dropped with a warning.
//! The durable notification row has already committed by the time a push
//! is queued, so a dropped push loses nothing permanently.

use crossbeam_queue::ArrayQueue;
use std::sync::Arc;

use super::models::Notice;

/// Cloneable handle over the bounded queue
#[derive(Clone)]
pub struct NotifyQueue {
    inner: Arc<ArrayQueue<Notice>>,
}

impl NotifyQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(ArrayQueue::new(capacity)),
        }
    }

    /// Non-blocking push; drops the notice if the queue is full.
    pub fn push(&self, notice: Notice) {
        if let Err(dropped) = self.inner.push(notice) {
            tracing::warn!(
                user_id = dropped.user_id,
                "Notification queue full, dropping live push"
            );
        }
    }

    pub fn pop(&self) -> Option<Notice> {
        self.inner.pop()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
