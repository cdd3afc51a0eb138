//! Live push pipeline QA: queue -> dispatcher -> hub -> session channel
//!
//! No database and no sockets. Sessions are the same mpsc channels the
//! WebSocket layer registers, so these scenarios exercise the exact
//! delivery path a connected client sees.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use corebank::notify::{DispatchHub, Dispatcher, Notice, NotifyQueue};

fn notice(user_id: i64, message: &str) -> Notice {
    Notice {
        user_id,
        message: message.to_string(),
    }
}

fn dispatcher_for(hub: &Arc<DispatchHub>, queue: &NotifyQueue) -> Dispatcher {
    Dispatcher::new(hub.clone(), queue.clone(), Duration::from_millis(5))
}

#[tokio::test]
async fn qa_notice_reaches_only_its_addressee() {
    let hub = Arc::new(DispatchHub::new());
    let queue = NotifyQueue::with_capacity(16);
    let dispatcher = dispatcher_for(&hub, &queue);

    let (tx7, mut rx7) = mpsc::unbounded_channel();
    let (tx9, mut rx9) = mpsc::unbounded_channel();
    hub.register(7, tx7);
    hub.register(9, tx9);

    queue.push(notice(7, "You received 40.00 from A001"));
    queue.push(notice(8, "nobody is connected for user 8"));
    queue.push(notice(9, "User A001 requested 15.00 from you"));

    // Everything queued is consumed, even notices without a session
    assert_eq!(dispatcher.drain(), 3);
    assert!(queue.is_empty());

    let delivered = rx7.try_recv().expect("User 7 should get a notice");
    assert_eq!(delivered.user_id, 7);
    assert_eq!(delivered.message, "You received 40.00 from A001");
    assert!(rx7.try_recv().is_err());

    let delivered = rx9.try_recv().expect("User 9 should get a notice");
    assert_eq!(delivered.message, "User A001 requested 15.00 from you");
}

#[tokio::test]
async fn qa_reconnect_supersedes_previous_session() {
    let hub = Arc::new(DispatchHub::new());
    let queue = NotifyQueue::with_capacity(16);
    let dispatcher = dispatcher_for(&hub, &queue);

    let (old_tx, mut old_rx) = mpsc::unbounded_channel();
    let old_conn = hub.register(7, old_tx);

    // Same user reconnects; the fresh session wins
    let (new_tx, mut new_rx) = mpsc::unbounded_channel();
    hub.register(7, new_tx);

    queue.push(notice(7, "after reconnect"));
    assert_eq!(dispatcher.drain(), 1);

    assert!(old_rx.try_recv().is_err());
    assert_eq!(new_rx.try_recv().unwrap().message, "after reconnect");

    // The stale socket's teardown must not tear down the successor
    hub.unregister(7, old_conn);
    assert_eq!(hub.session_count(), 1);

    queue.push(notice(7, "still delivered"));
    assert_eq!(dispatcher.drain(), 1);
    assert_eq!(new_rx.try_recv().unwrap().message, "still delivered");
}

#[tokio::test]
async fn qa_dead_session_is_evicted_and_delivery_resumes_on_reconnect() {
    let hub = Arc::new(DispatchHub::new());
    let queue = NotifyQueue::with_capacity(16);
    let dispatcher = dispatcher_for(&hub, &queue);

    let (tx, rx) = mpsc::unbounded_channel();
    hub.register(7, tx);
    // Socket side went away without unregistering
    drop(rx);

    queue.push(notice(7, "lands nowhere"));
    assert_eq!(dispatcher.drain(), 1);
    assert_eq!(hub.session_count(), 0);

    // Reconnect and deliveries resume
    let (tx, mut rx) = mpsc::unbounded_channel();
    hub.register(7, tx);
    queue.push(notice(7, "back online"));
    assert_eq!(dispatcher.drain(), 1);
    assert_eq!(rx.try_recv().unwrap().message, "back online");
}

#[tokio::test]
async fn qa_full_queue_drops_newest_and_recovers_after_drain() {
    let hub = Arc::new(DispatchHub::new());
    let queue = NotifyQueue::with_capacity(2);
    let dispatcher = dispatcher_for(&hub, &queue);

    let (tx, mut rx) = mpsc::unbounded_channel();
    hub.register(7, tx);

    queue.push(notice(7, "first"));
    queue.push(notice(7, "second"));
    // Queue is full; this push is dropped, committed rows are unaffected
    queue.push(notice(7, "third"));

    assert_eq!(dispatcher.drain(), 2);
    assert_eq!(rx.try_recv().unwrap().message, "first");
    assert_eq!(rx.try_recv().unwrap().message, "second");
    assert!(rx.try_recv().is_err());

    // Capacity is available again once drained
    queue.push(notice(7, "fourth"));
    assert_eq!(dispatcher.drain(), 1);
    assert_eq!(rx.try_recv().unwrap().message, "fourth");
}
