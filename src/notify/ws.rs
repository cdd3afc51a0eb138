//! WebSocket intake for live notifications
//!
//! Handles the upgrade, registers the session with the hub, forwards
//! notices as JSON text frames, and unregisters on disconnect.

use axum::extract::ws::{Message, WebSocket};
use axum::{
    extract::{Query, State, WebSocketUpgrade},
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::DispatchHub;
use super::models::Notice;
use crate::server::AppState;

/// WebSocket connection query parameters
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub user_id: i64,
}

/// WebSocket upgrade handler
///
/// Endpoint: GET /ws?user_id=7
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<WsQuery>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = state.hub.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, params.user_id, hub))
}

/// Handle one WebSocket session's lifecycle
async fn handle_socket(socket: WebSocket, user_id: i64, hub: Arc<DispatchHub>) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Notice>();

    // Register with the hub; an older session for this user is superseded
    let conn_id = hub.register(user_id, tx);

    // Greeting frame so clients can confirm the session is live
    let greeting = Notice {
        user_id,
        message: "connected".to_string(),
    };
    if let Ok(json) = serde_json::to_string(&greeting) {
        let _ = sender.send(Message::Text(json.into())).await;
    }

    // Forward notices from the hub channel to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(notice) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&notice) {
                if sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // Drain client frames; exit on close or transport error
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    }

    // Remove only our own registry entry
    hub.unregister(user_id, conn_id);
}
