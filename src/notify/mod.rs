//! Real-time notification stack
//!
//! Durable rows first, live push second: every notification is committed
//! to the `notifications` table inside the producing transaction, then a
//! [`Notice`] is queued for best-effort WebSocket delivery. A missed push
//! is never an error; the row is the system of record.
//!
//! Flow: producer -> [`NotifyQueue`] -> [`Dispatcher`] -> [`DispatchHub`] -> socket

pub mod dispatcher;
pub mod hub;
pub mod models;
pub mod queue;
pub mod store;
pub mod ws;

pub use dispatcher::Dispatcher;
pub use hub::{ConnectionId, DispatchHub, NoticeSender};
pub use models::{Notice, Notification, NotificationCategory, NotificationFilter};
pub use queue::NotifyQueue;
pub use store::NotificationStore;
pub use ws::ws_handler;
