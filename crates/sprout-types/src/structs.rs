//! Core entity structs for the Urban Sprout simulation.
//!
//! Covers the garden plot, the static plant specification, the game state
//! aggregate, log entries, externally sourced daily events, and the
//! per-day history samples used for trend display.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{EffectType, LogKind, PlantKind, Weather};

// ---------------------------------------------------------------------------
// Plot
// ---------------------------------------------------------------------------

/// Upper bound of every plot gauge (growth, water level, health).
pub const GAUGE_MAX: f64 = 100.0;

/// Lower bound of every plot gauge.
pub const GAUGE_MIN: f64 = 0.0;

/// One cell of the garden grid.
///
/// Plots live in a fixed-length sequence where position equals identity:
/// `id` never changes and is never reused. Planting, harvesting, and
/// removing replace the content in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Plot {
    /// Stable grid index.
    pub id: u32,
    /// What is growing here, or [`PlantKind::Empty`].
    pub plant: PlantKind,
    /// Maturity progress in `[0, 100]`; 100 is harvestable.
    pub growth_stage: f64,
    /// Soil moisture in `[0, 100]`, separate from the shared water supply.
    pub water_level: f64,
    /// Vitality in `[0, 100]`. Zero means worthless, not removed.
    pub health: f64,
    /// Day the current plant was sown. Bookkeeping only.
    pub planted_day: u64,
}

impl Plot {
    /// A plot in the canonical rest state: empty, dry, fully healthy.
    pub const fn empty(id: u32) -> Self {
        Self {
            id,
            plant: PlantKind::Empty,
            growth_stage: GAUGE_MIN,
            water_level: GAUGE_MIN,
            health: GAUGE_MAX,
            planted_day: 0,
        }
    }

    /// Whether nothing is planted here.
    pub const fn is_empty(&self) -> bool {
        self.plant.is_empty()
    }

    /// Whether the plant has reached harvestable maturity.
    pub const fn is_mature(&self) -> bool {
        !self.is_empty() && self.growth_stage >= GAUGE_MAX
    }

    /// Reset to the canonical rest state, keeping the id.
    ///
    /// `planted_day` is left as-is; it only ever describes the last sowing.
    pub const fn clear(&mut self) {
        self.plant = PlantKind::Empty;
        self.growth_stage = GAUGE_MIN;
        self.water_level = GAUGE_MIN;
        self.health = GAUGE_MAX;
    }
}

// ---------------------------------------------------------------------------
// PlantSpec
// ---------------------------------------------------------------------------

/// Static growing parameters for one plant variant.
///
/// [`PlantKind::Empty`] has an all-zero spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSpec {
    /// The variant this spec describes.
    #[serde(rename = "type")]
    pub kind: PlantKind,
    /// Days from sowing to full growth under normal health.
    pub days_to_maturity: u32,
    /// Baseline daily water consumption from the plot's water level.
    pub water_needs: u32,
    /// Money earned when harvested at full health.
    pub value: u32,
    /// Money spent to sow.
    pub cost: u32,
    /// Display text.
    pub description: &'static str,
}

// ---------------------------------------------------------------------------
// LogEvent
// ---------------------------------------------------------------------------

/// One chronological log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LogEvent {
    /// Day on which the entry was written.
    pub day: u64,
    /// Free text.
    pub message: String,
    /// Entry category.
    #[serde(rename = "type")]
    pub kind: LogKind,
}

// ---------------------------------------------------------------------------
// GameState
// ---------------------------------------------------------------------------

/// The single mutable aggregate of a play session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct GameState {
    /// Current day, starting at 1 and only ever incremented.
    pub day: u64,
    /// Currency. Guarded at spend time only; events may push it negative.
    pub money: i64,
    /// Shared water reservoir used to water individual plots.
    pub water_supply: i64,
    /// Fixed-length grid, ordered by plot id.
    pub slots: Vec<Plot>,
    /// Log entries, newest first.
    pub logs: Vec<LogEvent>,
    /// Weather for the coming day.
    pub weather: Weather,
}

impl GameState {
    /// Prepend a log entry stamped with the current day.
    pub fn push_log(&mut self, kind: LogKind, message: impl Into<String>) {
        self.logs.insert(
            0,
            LogEvent {
                day: self.day,
                message: message.into(),
                kind,
            },
        );
    }

    /// Look up a plot by id.
    pub fn plot(&self, id: u32) -> Option<&Plot> {
        self.slots.iter().find(|plot| plot.id == id)
    }

    /// Look up a plot by id for mutation.
    pub fn plot_mut(&mut self, id: u32) -> Option<&mut Plot> {
        self.slots.iter_mut().find(|plot| plot.id == id)
    }

    /// Iterate over plots that hold a plant.
    pub fn planted(&self) -> impl Iterator<Item = &Plot> {
        self.slots.iter().filter(|plot| !plot.is_empty())
    }
}

// ---------------------------------------------------------------------------
// DailyEvent
// ---------------------------------------------------------------------------

/// A one-time effect produced by the event generator for a new day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct DailyEvent {
    /// Short headline.
    pub title: String,
    /// One-sentence description.
    #[serde(default)]
    pub description: String,
    /// Which part of the state is affected.
    pub effect_type: EffectType,
    /// Signed magnitude of the effect.
    pub effect_value: i64,
    /// New weather, if the event changes it.
    #[serde(default)]
    pub weather_change: Option<Weather>,
}

// ---------------------------------------------------------------------------
// HistorySample
// ---------------------------------------------------------------------------

/// Money and water supply at the end of a day, for trend charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct HistorySample {
    /// The day the sample describes.
    pub day: u64,
    /// Money after the day's event was merged.
    pub money: i64,
    /// Water supply after the day's event was merged.
    pub water_supply: i64,
}
