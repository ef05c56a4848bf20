//! REST API endpoint handlers for the garden server.
//!
//! Reads are served from the latest published [`SessionSnapshot`] and never
//! wait on the game's command queue. Intents are forwarded to the game
//! service and answer with the post-intent [`GameState`].
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Minimal HTML status page |
//! | `GET` | `/api/state` | Current game state |
//! | `GET` | `/api/history` | Daily money and water samples |
//! | `GET` | `/api/logs` | Log entries, newest first (`?kind=&limit=`) |
//! | `GET` | `/api/plants` | Plant catalog |
//! | `GET` | `/api/status` | Revision, day, uptime |
//! | `POST` | `/api/plots/{id}/plant` | Plant a seed |
//! | `POST` | `/api/plots/{id}/water` | Water a plot |
//! | `POST` | `/api/plots/{id}/harvest` | Harvest a plot |
//! | `POST` | `/api/plots/{id}/remove` | Clear a plot |
//! | `POST` | `/api/water/buy` | Buy a water refill |
//! | `POST` | `/api/day/advance` | Advance one day |
//! | `POST` | `/api/advisor/chat` | Ask the advisor |
//!
//! [`SessionSnapshot`]: sprout_core::SessionSnapshot

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse};
use chrono::{DateTime, Utc};
use sprout_types::{GameState, HistorySample, LogEvent, LogKind, PlantKind, PlantSpec};
use tracing::debug;

use crate::error::ObserverError;
use crate::state::AppState;

/// Log entries returned when no `limit` is given.
const DEFAULT_LOG_LIMIT: usize = 100;

// ---------------------------------------------------------------------------
// Request and response bodies
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/logs`.
#[derive(Debug, serde::Deserialize)]
pub struct LogsQuery {
    /// Only entries of this kind.
    pub kind: Option<LogKind>,
    /// Maximum number of entries to return (default 100).
    pub limit: Option<usize>,
}

/// Body of `POST /api/plots/{id}/plant`.
#[derive(Debug, serde::Deserialize)]
pub struct PlantRequest {
    /// What to sow.
    pub plant: PlantKind,
}

/// Body of `POST /api/advisor/chat`.
#[derive(Debug, serde::Deserialize)]
pub struct ChatRequest {
    /// The player's question.
    pub question: String,
}

/// Reply of `POST /api/advisor/chat`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ChatResponse {
    /// Advice text, or the canned fallback.
    pub answer: String,
}

/// Reply of `GET /api/status`.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Revision of the latest published snapshot.
    pub revision: u64,
    /// Current game day.
    pub day: u64,
    /// When the server started.
    pub started_at: DateTime<Utc>,
    /// Seconds since the server started.
    pub uptime_seconds: i64,
}

// ---------------------------------------------------------------------------
// GET / -- minimal HTML status page
// ---------------------------------------------------------------------------

/// Serve a minimal HTML page with the headline numbers and API links.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let snapshot = state.game.snapshot();
    let game = &snapshot.state;
    let day = game.day;
    let weather = game.weather;
    let money = game.money;
    let water = game.water_supply;
    let planted = game.planted().count();
    let plots = game.slots.len();
    let revision = snapshot.revision;

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Urban Sprout</title>
    <style>
        body {{
            background: #0f1a12;
            color: #d4e7d0;
            font-family: 'Fira Code', 'Consolas', monospace;
            padding: 2rem;
            max-width: 800px;
            margin: 0 auto;
        }}
        h1 {{ color: #7ee787; margin-bottom: 0.25rem; }}
        .metric {{
            display: inline-block;
            background: #16241a;
            border: 1px solid #2e4633;
            border-radius: 6px;
            padding: 1rem 1.5rem;
            margin: 0.5rem 0.5rem 0.5rem 0;
            min-width: 120px;
        }}
        .metric .label {{ color: #8fae8b; font-size: 0.85rem; }}
        .metric .value {{ color: #7ee787; font-size: 1.5rem; font-weight: bold; }}
        a {{ color: #7ee787; text-decoration: none; }}
        ul {{ list-style: none; padding: 0; }}
        li {{ padding: 0.3rem 0; }}
    </style>
</head>
<body>
    <h1>Urban Sprout</h1>
    <p>Revision {revision}</p>

    <div>
        <div class="metric"><div class="label">Day</div><div class="value">{day}</div></div>
        <div class="metric"><div class="label">Weather</div><div class="value">{weather}</div></div>
        <div class="metric"><div class="label">Money</div><div class="value">${money}</div></div>
        <div class="metric"><div class="label">Water</div><div class="value">{water}L</div></div>
        <div class="metric"><div class="label">Planted</div><div class="value">{planted}/{plots}</div></div>
    </div>

    <h2>API</h2>
    <ul>
        <li><a href="/api/state">/api/state</a> -- Current game state</li>
        <li><a href="/api/history">/api/history</a> -- Money and water per day</li>
        <li><a href="/api/logs">/api/logs</a> -- Log entries (?kind=warning&amp;limit=20)</li>
        <li><a href="/api/plants">/api/plants</a> -- Plant catalog</li>
        <li><a href="/api/status">/api/status</a> -- Server status</li>
        <li><code>ws://host:port/ws/state</code> -- Live state stream</li>
    </ul>
</body>
</html>"#
    ))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Return the current game state.
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<GameState> {
    Json(state.game.state())
}

/// Return the daily history samples, oldest first.
pub async fn get_history(State(state): State<Arc<AppState>>) -> Json<Vec<HistorySample>> {
    Json(state.game.snapshot().history)
}

/// Return log entries, newest first (the state keeps them in that order).
///
/// # Query Parameters
///
/// - `kind`: `info` | `warning` | `success` | `event`
/// - `limit`: maximum entries (default 100)
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
    query: Result<Query<LogsQuery>, QueryRejection>,
) -> Result<Json<Vec<LogEvent>>, ObserverError> {
    let Query(params) = query?;
    let limit = params.limit.unwrap_or(DEFAULT_LOG_LIMIT);
    let logs = state
        .game
        .state()
        .logs
        .into_iter()
        .filter(|entry| params.kind.is_none_or(|kind| entry.kind == kind))
        .take(limit)
        .collect();
    Ok(Json(logs))
}

/// Return the catalog of plantable crops.
pub async fn list_plants() -> Json<Vec<PlantSpec>> {
    Json(sprout_world::catalog::crops().collect())
}

/// Return revision, day, and uptime.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.game.snapshot();
    Json(StatusResponse {
        revision: snapshot.revision,
        day: snapshot.state.day,
        started_at: state.started_at,
        uptime_seconds: state.uptime_seconds(),
    })
}

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// Request planting. The tip and the commit follow asynchronously.
pub async fn plant(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
    body: Result<Json<PlantRequest>, JsonRejection>,
) -> Result<Json<GameState>, ObserverError> {
    let Path(id) = id?;
    let Json(body) = body?;
    debug!(plot = id, plant = %body.plant, "Plant requested");
    Ok(Json(state.game.plant_seed(id, body.plant).await?))
}

/// Water a plot.
pub async fn water(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<GameState>, ObserverError> {
    let Path(id) = id?;
    Ok(Json(state.game.water(id).await?))
}

/// Harvest a plot.
pub async fn harvest(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<GameState>, ObserverError> {
    let Path(id) = id?;
    Ok(Json(state.game.harvest(id).await?))
}

/// Clear a plot.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u32>, PathRejection>,
) -> Result<Json<GameState>, ObserverError> {
    let Path(id) = id?;
    Ok(Json(state.game.remove(id).await?))
}

/// Buy a water refill.
pub async fn buy_water(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameState>, ObserverError> {
    Ok(Json(state.game.buy_water().await?))
}

/// Advance one day.
pub async fn advance_day(
    State(state): State<Arc<AppState>>,
) -> Result<Json<GameState>, ObserverError> {
    Ok(Json(state.game.advance_day().await?))
}

/// Ask the advisor a question about the current game.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ObserverError> {
    let Json(body) = body?;
    let question = body.question.trim();
    if question.is_empty() {
        return Err(ObserverError::InvalidRequest(
            "question must not be empty".to_owned(),
        ));
    }
    let answer = state.game.chat(question).await?;
    Ok(Json(ChatResponse { answer }))
}
