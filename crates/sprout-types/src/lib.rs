//! Shared type definitions for the Urban Sprout garden simulation.
//!
//! This crate is the single source of truth for the data model used across
//! the workspace. Types flow downstream to `TypeScript` via `ts-rs` for the
//! garden dashboard.
//!
//! # Modules
//!
//! - [`enums`] -- Plants, weather, log kinds, and daily event effects
//! - [`structs`] -- Plots, plant specs, game state, log entries, daily
//!   events, and history samples

pub mod enums;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{EffectType, LogKind, PlantKind, Weather};
pub use structs::{
    DailyEvent, GAUGE_MAX, GAUGE_MIN, GameState, HistorySample, LogEvent, PlantSpec, Plot,
};
