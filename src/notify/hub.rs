//! Live session registry
//!
//! Maps a user id to its single live WebSocket session using DashMap for
//! concurrent access. A new connection for the same user supersedes the
//! old registry entry; the superseded socket's read loop cannot evict its
//! successor because `unregister` is guarded by the connection id.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;

use super::models::Notice;

/// Sender half of a session's forward channel
pub type NoticeSender = mpsc::UnboundedSender<Notice>;

/// Unique connection identifier
pub type ConnectionId = u64;

struct SessionHandle {
    conn_id: ConnectionId,
    tx: NoticeSender,
}

/// Concurrent user_id -> live session registry
///
/// The only operations exposed are register, unregister, and dispatch;
/// nothing outside this module touches the map.
pub struct DispatchHub {
    sessions: DashMap<i64, SessionHandle>,
    next_conn_id: AtomicU64,
}

impl DispatchHub {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            next_conn_id: AtomicU64::new(1),
        }
    }

    /// Register a session for a user, superseding any existing one.
    ///
    /// Returns the unique connection id the session must present when it
    /// unregisters.
    pub fn register(&self, user_id: i64, tx: NoticeSender) -> ConnectionId {
        let conn_id = self.next_conn_id.fetch_add(1, Ordering::Relaxed);
        let previous = self.sessions.insert(user_id, SessionHandle { conn_id, tx });

        match previous {
            Some(old) => tracing::info!(
                user_id,
                conn_id,
                old_conn_id = old.conn_id,
                "WebSocket session superseded"
            ),
            None => tracing::info!(user_id, conn_id, "WebSocket session registered"),
        }

        conn_id
    }

    /// Remove a session, but only if it still owns the registry slot.
    ///
    /// A read loop dying after its session was superseded is a no-op here.
    pub fn unregister(&self, user_id: i64, conn_id: ConnectionId) {
        let removed = self
            .sessions
            .remove_if(&user_id, |_, handle| handle.conn_id == conn_id);

        if removed.is_some() {
            tracing::info!(user_id, conn_id, "WebSocket session unregistered");
        }
    }

    /// Best-effort delivery to a user's live session.
    ///
    /// No session is a silent no-op; a dead channel evicts the entry.
    /// Never fails: the durable notification row is the system of record.
    pub fn dispatch(&self, notice: &Notice) {
        let user_id = notice.user_id;
        let Some(entry) = self.sessions.get(&user_id) else {
            tracing::debug!(user_id, "No live session, skipping push");
            return;
        };

        if entry.tx.send(notice.clone()).is_err() {
            let conn_id = entry.conn_id;
            drop(entry); // Release the shard lock before removing
            self.sessions
                .remove_if(&user_id, |_, handle| handle.conn_id == conn_id);
            tracing::warn!(user_id, conn_id, "Dead session evicted during dispatch");
        }
    }

    /// Number of live sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for DispatchHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(user_id: i64, message: &str) -> Notice {
        Notice {
            user_id,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_register_dispatch_unregister() {
        let hub = DispatchHub::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let conn_id = hub.register(7, tx);
        assert_eq!(hub.session_count(), 1);

        hub.dispatch(&notice(7, "You received 40.00 from A001"));
        let received = rx.try_recv().unwrap();
        assert_eq!(received.message, "You received 40.00 from A001");

        hub.unregister(7, conn_id);
        assert_eq!(hub.session_count(), 0);
    }

    #[test]
    fn test_dispatch_without_session_is_noop() {
        let hub = DispatchHub::new();
        hub.dispatch(&notice(99, "nobody listening"));
        assert_eq!(hub.session_count(), 0);
    }

    #[test]
    fn test_new_session_supersedes_old() {
        let hub = DispatchHub::new();
        let (tx_old, mut rx_old) = mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();

        hub.register(7, tx_old);
        hub.register(7, tx_new);
        assert_eq!(hub.session_count(), 1);

        hub.dispatch(&notice(7, "hello"));
        assert!(rx_old.try_recv().is_err(), "old session must not receive");
        assert_eq!(rx_new.try_recv().unwrap().message, "hello");
    }

    #[test]
    fn test_stale_unregister_keeps_successor() {
        let hub = DispatchHub::new();
        let (tx_old, _rx_old) = mpsc::unbounded_channel();
        let (tx_new, mut rx_new) = mpsc::unbounded_channel();

        let old_conn = hub.register(7, tx_old);
        hub.register(7, tx_new);

        // The superseded read loop exits late and tries to clean up
        hub.unregister(7, old_conn);
        assert_eq!(hub.session_count(), 1, "successor must survive");

        hub.dispatch(&notice(7, "still here"));
        assert_eq!(rx_new.try_recv().unwrap().message, "still here");
    }

    #[test]
    fn test_dead_channel_evicted_on_dispatch() {
        let hub = DispatchHub::new();
        let (tx, rx) = mpsc::unbounded_channel();
        hub.register(7, tx);
        drop(rx); // Client gone, channel closed

        hub.dispatch(&notice(7, "into the void"));
        assert_eq!(hub.session_count(), 0, "dead session should be evicted");
    }
}
