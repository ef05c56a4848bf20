//! Shared application state for the garden API.
//!
//! [`AppState`] holds a [`GameHandle`] to the running game service. Reads
//! come from the handle's latest published snapshot; intents go through its
//! command queue, so the HTTP layer never mutates the game directly.

use chrono::{DateTime, Utc};
use sprout_core::{GameHandle, SessionSnapshot};
use tokio::sync::watch;

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Client for the game service.
    pub game: GameHandle,
    /// When the server state was created.
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Create the application state around a running game.
    pub fn new(game: GameHandle) -> Self {
        Self {
            game,
            started_at: Utc::now(),
        }
    }

    /// Subscribe to state-changed notifications.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.game.subscribe()
    }

    /// Whole seconds since the server state was created.
    pub fn uptime_seconds(&self) -> i64 {
        Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
            .max(0)
    }
}
