//! Plants, weather, and per-plot daily rules for the Urban Sprout simulation.
//!
//! This crate models the garden itself: what each plant needs, how weather
//! changes consumption, and how a single plot's water, health, and growth
//! evolve from one day to the next. Whole-garden orchestration lives in
//! `sprout-core`.
//!
//! # Modules
//!
//! - [`catalog`] -- Static [`PlantSpec`](sprout_types::PlantSpec) per plant.
//! - [`environment`] -- Weather multipliers and the fallback weather cycle.
//! - [`plot`] -- Water, health, and growth rules plus harvest value.

pub mod catalog;
pub mod environment;
pub mod plot;

// Re-export primary items at crate root.
pub use environment::{FALLBACK_WEATHER_CYCLE, FallbackWeather};
pub use plot::{grow_plot, harvest_earnings};
