//! `WebSocket` handler for live state streaming.
//!
//! Clients connect to `GET /ws/state` and receive the current
//! [`SessionSnapshot`] as JSON right away, then again after every change.
//! The feed follows a [`watch`](tokio::sync::watch) channel, so a slow
//! client skips intermediate revisions and always resumes at the newest.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use sprout_core::SessionSnapshot;
use tracing::{debug, warn};

use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin
/// streaming snapshots.
///
/// # Route
///
/// `GET /ws/state`
pub async fn ws_state(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Serialize a snapshot into a text frame.
fn frame(snapshot: &SessionSnapshot) -> Option<Message> {
    match serde_json::to_string(snapshot) {
        Ok(json) => Some(Message::Text(json.into())),
        Err(e) => {
            warn!(revision = snapshot.revision, "Failed to serialize snapshot: {e}");
            None
        }
    }
}

async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    let mut rx = state.subscribe();

    let initial = frame(&rx.borrow_and_update());
    if let Some(msg) = initial
        && socket.send(msg).await.is_err()
    {
        debug!("WebSocket client disconnected (send failed)");
        return;
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    debug!("Game service stopped, closing WebSocket");
                    return;
                }
                let next = frame(&rx.borrow_and_update());
                if let Some(msg) = next
                    && socket.send(msg).await.is_err()
                {
                    debug!("WebSocket client disconnected (send failed)");
                    return;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {}
                }
            }
        }
    }
}
