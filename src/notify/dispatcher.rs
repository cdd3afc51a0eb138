//! Notification dispatcher
//!
//! Single consumer task between the bounded queue and the hub. Producers
//! push committed notices and return immediately; this task drains the
//! queue on a fixed interval and hands each notice to whatever live
//! session the hub currently holds.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use super::hub::DispatchHub;
use super::queue::NotifyQueue;

/// Upper bound on notices handled per drain, so one tick cannot hold the
/// task indefinitely while producers keep the queue non-empty
const MAX_DRAIN_PER_TICK: usize = 1000;

pub struct Dispatcher {
    hub: Arc<DispatchHub>,
    queue: NotifyQueue,
    drain_interval: Duration,
}

impl Dispatcher {
    pub fn new(hub: Arc<DispatchHub>, queue: NotifyQueue, drain_interval: Duration) -> Self {
        Self {
            hub,
            queue,
            drain_interval,
        }
    }

    /// Run the dispatch loop.
    pub async fn run(self) {
        let mut tick = interval(self.drain_interval);
        tracing::info!(
            interval_ms = self.drain_interval.as_millis() as u64,
            "Notification dispatcher started"
        );

        loop {
            tick.tick().await;
            self.drain();
        }
    }

    /// Drain everything currently queued. Returns the number dispatched.
    pub fn drain(&self) -> usize {
        let mut count = 0;
        while let Some(notice) = self.queue.pop() {
            self.hub.dispatch(&notice);
            count += 1;
            if count >= MAX_DRAIN_PER_TICK {
                break;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::models::Notice;
    use tokio::sync::mpsc;

    #[test]
    fn test_drain_delivers_to_registered_session() {
        let hub = Arc::new(DispatchHub::new());
        let queue = NotifyQueue::with_capacity(8);
        let dispatcher = Dispatcher::new(hub.clone(), queue.clone(), Duration::from_millis(50));

        let (tx, mut rx) = mpsc::unbounded_channel();
        hub.register(7, tx);

        queue.push(Notice {
            user_id: 7,
            message: "You received 40.00 from A001".to_string(),
        });
        queue.push(Notice {
            user_id: 7,
            message: "User A002 requested 15.00 from you".to_string(),
        });

        assert_eq!(dispatcher.drain(), 2);
        assert_eq!(rx.try_recv().unwrap().message, "You received 40.00 from A001");
        assert_eq!(
            rx.try_recv().unwrap().message,
            "User A002 requested 15.00 from you"
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_without_session_still_consumes() {
        let hub = Arc::new(DispatchHub::new());
        let queue = NotifyQueue::with_capacity(8);
        let dispatcher = Dispatcher::new(hub, queue.clone(), Duration::from_millis(50));

        queue.push(Notice {
            user_id: 42,
            message: "nobody connected".to_string(),
        });

        assert_eq!(dispatcher.drain(), 1);
        assert!(queue.is_empty());
    }
}
