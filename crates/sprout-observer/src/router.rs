//! Axum router construction for the garden API.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS enabled for the browser dashboard.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router. See [`handlers`] for the endpoint table;
/// `GET /ws/state` streams snapshots.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/ws/state", get(ws::ws_state))
        // Reads
        .route("/api/state", get(handlers::get_state))
        .route("/api/history", get(handlers::get_history))
        .route("/api/logs", get(handlers::list_logs))
        .route("/api/plants", get(handlers::list_plants))
        .route("/api/status", get(handlers::get_status))
        // Intents
        .route("/api/plots/{id}/plant", post(handlers::plant))
        .route("/api/plots/{id}/water", post(handlers::water))
        .route("/api/plots/{id}/harvest", post(handlers::harvest))
        .route("/api/plots/{id}/remove", post(handlers::remove))
        .route("/api/water/buy", post(handlers::buy_water))
        .route("/api/day/advance", post(handlers::advance_day))
        .route("/api/advisor/chat", post(handlers::chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
