//! corebank - Core Banking Ledger Service
//!
//! Atomic two-account transfers, money requests with 24 hour deadlines,
//! and real-time WebSocket notifications, all on PostgreSQL.
//!
//! # Modules
//!
//! - [`money`] - Amount validation and fixed-point formatting
//! - [`account`] - Account rows, row locks, balance mutation
//! - [`transfer`] - Atomic transfer engine and ledger queries
//! - [`request`] - Money request lifecycle and expiry sweep
//! - [`notify`] - Durable notifications plus live push plumbing
//! - [`audit`] - Append-only audit log sink
//! - [`db`] - PostgreSQL pool and schema migrations
//! - [`server`] - Axum gateway (health check + WebSocket)

// Shared plumbing
pub mod config;
pub mod db;
pub mod logging;
pub mod money;

// Domain services
pub mod account;
pub mod audit;
pub mod notify;
pub mod request;
pub mod transfer;

// Gateway
pub mod server;

// Convenient re-exports at crate root
pub use account::{Account, AccountStore};
pub use config::AppConfig;
pub use db::Database;
pub use notify::{DispatchHub, Dispatcher, Notice, Notification, NotifyQueue};
pub use request::{ExpiryWorker, MoneyRequest, RequestError, RequestService, RequestStatus};
pub use transfer::{LedgerError, TransferCommand, TransferEngine, TransferOutcome};
