//! The single owner of a play session.
//!
//! [`GameController`] holds the [`GameState`], its history, and the
//! fallback weather generator, and is the only thing that mutates them.
//! Everything it exposes is an intent or a read-only view.
//!
//! Day advance order:
//!
//! 1. Grow every plot under the current weather, `day += 1`.
//! 2. Ask the advisor for the new day's event (bounded by a deadline).
//! 3. Merge the event, or roll fallback weather if there is none.
//! 4. Record one history sample.

use std::sync::Arc;

use serde::Serialize;
use sprout_types::{GameState, HistorySample, LogKind, PlantKind, Plot, Weather};
use sprout_world::FallbackWeather;
use tracing::info;

use crate::advisor::{self, Advisor};
use crate::config::{AdvisorConfig, EconomyConfig, SimulationConfig};
use crate::day;
use crate::error::GameError;
use crate::event::{self, EventOutcome};
use crate::history::HistoryRecorder;
use crate::intents::{self, IntentOutcome};

/// Greeting logged when a session starts.
pub const WELCOME_MESSAGE: &str = "Welcome to Urban Sprout! Start by planting seeds.";

/// A consistent view of the session at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// The game state.
    pub state: GameState,
    /// Daily samples, oldest first.
    pub history: Vec<HistorySample>,
    /// Bumped on every published change.
    pub revision: u64,
}

/// What happened during one day advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayReport {
    /// The day that just began.
    pub day: u64,
    /// Weather for the new day.
    pub weather: Weather,
    /// Whether an external event was merged (otherwise fallback weather).
    pub event_applied: bool,
}

/// Build the opening state: every plot empty, day 1, sunny, one greeting.
pub fn new_game(config: &SimulationConfig) -> GameState {
    let mut state = GameState {
        day: 1,
        money: config.economy.initial_money,
        water_supply: config.economy.initial_water,
        slots: (0..config.garden.grid_size).map(Plot::empty).collect(),
        logs: Vec::new(),
        weather: Weather::Sunny,
    };
    state.push_log(LogKind::Info, WELCOME_MESSAGE);
    state
}

/// Owns and mutates one play session.
#[derive(Debug)]
pub struct GameController<A> {
    state: GameState,
    history: HistoryRecorder,
    fallback: FallbackWeather,
    economy: EconomyConfig,
    deadlines: AdvisorConfig,
    advisor: Arc<A>,
}

impl<A: Advisor> GameController<A> {
    /// Start a new session.
    pub fn new(config: &SimulationConfig, advisor: Arc<A>) -> Self {
        let state = new_game(config);
        let history = HistoryRecorder::starting_at(&state);
        Self {
            state,
            history,
            fallback: FallbackWeather::new(config.simulation.seed),
            economy: config.economy.clone(),
            deadlines: config.advisor.clone(),
            advisor,
        }
    }

    /// The current game state.
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Daily samples, oldest first.
    pub fn history(&self) -> &[HistorySample] {
        self.history.samples()
    }

    /// The advisor this session consults.
    pub const fn advisor(&self) -> &Arc<A> {
        &self.advisor
    }

    /// Advisor deadlines.
    pub const fn deadlines(&self) -> &AdvisorConfig {
        &self.deadlines
    }

    /// Copy the session into a snapshot stamped with `revision`.
    pub fn snapshot(&self, revision: u64) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.clone(),
            history: self.history.samples().to_vec(),
            revision,
        }
    }

    // -----------------------------------------------------------------------
    // Day advance
    // -----------------------------------------------------------------------

    /// Grow the garden, merge the day's event, and record history.
    ///
    /// Never fails: an advisor failure or timeout takes the fallback path.
    pub async fn advance_day(&mut self) -> DayReport {
        day::advance_day(&mut self.state);
        let new_day = self.state.day;

        let event = advisor::event_or_none(
            self.advisor.as_ref(),
            new_day,
            self.deadlines.event_timeout(),
        )
        .await;
        let outcome = event::merge_daily_event(&mut self.state, event, &mut self.fallback);
        self.history.record(&self.state);

        let event_applied = outcome.is_applied();
        match &outcome {
            EventOutcome::Applied(event) => info!(
                day = new_day,
                weather = %self.state.weather,
                money = self.state.money,
                water = self.state.water_supply,
                title = %event.title,
                effect = ?event.effect_type,
                value = event.effect_value,
                "Day advanced with event"
            ),
            EventOutcome::Fallback(weather) => info!(
                day = new_day,
                weather = %weather,
                money = self.state.money,
                water = self.state.water_supply,
                "Day advanced with fallback weather"
            ),
        }

        DayReport {
            day: new_day,
            weather: self.state.weather,
            event_applied,
        }
    }

    // -----------------------------------------------------------------------
    // Intents
    // -----------------------------------------------------------------------

    /// Plant in one go: check, fetch the tip, commit.
    ///
    /// Holds `&mut self` across the tip request, so nothing can change the
    /// state in between. [`crate::GameService`] uses
    /// [`Self::begin_planting`] and [`Self::commit_planting`] instead so
    /// other intents keep flowing while the tip is pending.
    pub async fn plant_seed(
        &mut self,
        slot: u32,
        plant: PlantKind,
    ) -> Result<IntentOutcome, GameError> {
        if self.begin_planting(slot, plant)? != IntentOutcome::Pending {
            return Ok(IntentOutcome::Rejected);
        }
        let tip = advisor::tip_or_fallback(
            self.advisor.as_ref(),
            plant,
            self.deadlines.tip_timeout(),
        )
        .await;
        self.commit_planting(slot, plant, &tip)
    }

    /// Check a planting request and log that the advisor is consulted.
    pub fn begin_planting(
        &mut self,
        slot: u32,
        plant: PlantKind,
    ) -> Result<IntentOutcome, GameError> {
        intents::request_planting(&mut self.state, slot, plant)
    }

    /// Log the tip and sow, unless the state no longer allows it.
    pub fn commit_planting(
        &mut self,
        slot: u32,
        plant: PlantKind,
        tip: &str,
    ) -> Result<IntentOutcome, GameError> {
        intents::commit_planting(&mut self.state, slot, plant, tip, &self.economy)
    }

    /// Water one plot from the shared supply.
    pub fn water(&mut self, slot: u32) -> Result<IntentOutcome, GameError> {
        intents::water_slot(&mut self.state, slot, &self.economy)
    }

    /// Harvest one mature plot.
    pub fn harvest(&mut self, slot: u32) -> Result<IntentOutcome, GameError> {
        intents::harvest_slot(&mut self.state, slot)
    }

    /// Clear one plot.
    pub fn remove(&mut self, slot: u32) -> Result<IntentOutcome, GameError> {
        intents::remove_slot(&mut self.state, slot)
    }

    /// Buy a refill for the shared supply.
    pub fn buy_water(&mut self) -> IntentOutcome {
        intents::buy_water(&mut self.state, &self.economy)
    }

    /// Ask the advisor a question about the current state.
    pub async fn chat(&self, question: &str) -> String {
        advisor::chat_or_fallback(
            self.advisor.as_ref(),
            question,
            &self.state,
            self.deadlines.chat_timeout(),
        )
        .await
    }
}
