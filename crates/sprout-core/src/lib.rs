//! Game orchestration for the Urban Sprout garden simulation.
//!
//! This crate turns the per-plot rules of `sprout-world` into a playable
//! session: it loads configuration, advances the whole garden one day at
//! a time, merges the advisor's daily event, records history, applies the
//! player's intents, and serializes all of it behind a single owner.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with defaults and validation
//! - [`day`] -- The whole-garden growth step
//! - [`event`] -- Daily event merge and fallback weather
//! - [`history`] -- Per-day money and water samples
//! - [`intents`] -- Plant, water, harvest, remove, and buy water
//! - [`advisor`] -- The advisory collaborator contract and its fallbacks
//! - [`controller`] -- [`GameController`], the single session owner
//! - [`service`] -- [`GameService`], the command queue in front of it
//! - [`error`] -- [`GameError`]

pub mod advisor;
pub mod config;
pub mod controller;
pub mod day;
pub mod error;
pub mod event;
pub mod history;
pub mod intents;
pub mod service;

pub use advisor::{Advisor, AdvisorError, StubAdvisor};
pub use config::{ConfigError, SimulationConfig};
pub use controller::{DayReport, GameController, SessionSnapshot};
pub use error::GameError;
pub use intents::IntentOutcome;
pub use service::{GameHandle, GameService};
