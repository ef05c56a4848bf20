//! Garden API server for the Urban Sprout simulation.
//!
//! This crate is the render boundary: an Axum HTTP server that exposes
//!
//! - **REST reads** of the game state, history, logs, and plant catalog
//! - **REST intents** (plant, water, harvest, remove, buy water, advance
//!   day) and the advisor chat
//! - **`WebSocket` feed** (`/ws/state`) pushing a snapshot on every change
//! - **Minimal HTML status page** (`GET /`)
//!
//! # Architecture
//!
//! The server holds a [`GameHandle`](sprout_core::GameHandle). Reads come
//! from the snapshot the game service publishes after every change, so
//! they never wait behind a day advance. Intents are queued on the
//! service and answer with the post-intent state.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use error::ObserverError;
pub use router::build_router;
pub use server::{ServerError, spawn_observer};
pub use state::AppState;
