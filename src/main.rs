//! corebank - Core Banking Ledger Service
//!
//! Entry point. Boot order:
//!
//! ```text
//! ┌──────────┐    ┌───────────┐    ┌────────────┐    ┌──────────┐
//! │  Config  │───▶│ Postgres  │───▶│ Dispatcher │───▶│ Gateway  │
//! │  (YAML)  │    │ (+migrate)│    │ + Expiry   │    │  (axum)  │
//! └──────────┘    └───────────┘    └────────────┘    └──────────┘
//! ```
//!
//! The dispatcher drains the live-notification queue into WebSocket
//! sessions; the expiry worker sweeps overdue money requests. Both run for
//! the life of the process.

use std::sync::Arc;
use std::time::Duration;

use corebank::config::AppConfig;
use corebank::db::{Database, migrations};
use corebank::notify::{DispatchHub, Dispatcher, NotifyQueue};
use corebank::request::ExpiryWorker;
use corebank::server::{AppState, run_server};

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let app_config = AppConfig::load(&env);
    let _log_guard = corebank::logging::init_logging(&app_config);

    println!("=== corebank (build {}) ===", env!("GIT_HASH"));
    tracing::info!("Starting corebank in {} mode", env);

    // PostgreSQL pool + schema
    let db = Arc::new(Database::connect(&app_config.postgres_url).await?);
    migrations::run(db.pool()).await?;

    // Live notification plumbing
    let queue = NotifyQueue::with_capacity(app_config.notify.queue_capacity);
    let hub = Arc::new(DispatchHub::new());
    let dispatcher = Dispatcher::new(
        hub.clone(),
        queue.clone(),
        Duration::from_millis(app_config.notify.drain_interval_ms),
    );
    tokio::spawn(async move {
        dispatcher.run().await;
    });
    println!("📡 Notification dispatcher started");

    // Money request expiry sweep
    let expiry = ExpiryWorker::new(db.pool().clone(), queue.clone(), app_config.expiry.clone());
    let sweep_secs = app_config.expiry.sweep_interval_secs;
    tokio::spawn(async move {
        expiry.run().await;
    });
    println!("⏱️  Expiry sweep started (every {}s)", sweep_secs);

    // Gateway
    let port = get_port_override().unwrap_or(app_config.server.port);
    let state = Arc::new(AppState { db, hub });
    run_server(&app_config.server.host, port, state).await;

    Ok(())
}
