//! Enumeration types for the Urban Sprout simulation.
//!
//! Variant spellings double as the wire format: plants and weather use
//! their capitalized names (`"Tomato"`, `"Heatwave"`), log kinds and
//! event effects use lowercase (`"warning"`, `"money"`), matching what the
//! dashboard and the event generator exchange.

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Plants
// ---------------------------------------------------------------------------

/// The content of a garden plot.
///
/// [`PlantKind::Empty`] is the "unplanted" sentinel, not a plant: it has no
/// growth, no water needs, and is skipped by every daily rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum PlantKind {
    /// Slow, thirsty, valuable.
    Tomato,
    /// Fast growing herb.
    Basil,
    /// Quick grower with high water needs.
    Lettuce,
    /// Slow, low-maintenance root vegetable.
    Carrot,
    /// High value fruit, sensitive to water changes.
    Strawberry,
    /// No plant in the plot.
    Empty,
}

impl PlantKind {
    /// Every plantable variant, in catalog order. Excludes [`PlantKind::Empty`].
    pub const CROPS: [Self; 5] = [
        Self::Tomato,
        Self::Basil,
        Self::Lettuce,
        Self::Carrot,
        Self::Strawberry,
    ];

    /// Whether this is the unplanted sentinel.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Display name, identical to the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tomato => "Tomato",
            Self::Basil => "Basil",
            Self::Lettuce => "Lettuce",
            Self::Carrot => "Carrot",
            Self::Strawberry => "Strawberry",
            Self::Empty => "Empty",
        }
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Session-wide weather, affecting water consumption and replenishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub enum Weather {
    /// Baseline conditions.
    Sunny,
    /// Plots drink little and are refilled by rain.
    Rainy,
    /// Baseline consumption.
    Cloudy,
    /// Plots drink half again as much.
    Heatwave,
}

impl Weather {
    /// Every weather variant.
    pub const ALL: [Self; 4] = [Self::Sunny, Self::Rainy, Self::Cloudy, Self::Heatwave];

    /// Display name, identical to the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sunny => "Sunny",
            Self::Rainy => "Rainy",
            Self::Cloudy => "Cloudy",
            Self::Heatwave => "Heatwave",
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Log kinds
// ---------------------------------------------------------------------------

/// Category of a chronological log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum LogKind {
    /// Neutral information.
    Info,
    /// A rejected intent (affordability or precondition failure).
    Warning,
    /// A completed intent.
    Success,
    /// An externally sourced daily event.
    Event,
}

// ---------------------------------------------------------------------------
// Daily event effects
// ---------------------------------------------------------------------------

/// Which part of the state a daily event touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum EffectType {
    /// Adds the effect value to the water supply.
    Water,
    /// Adds the effect value to money.
    Money,
    /// Adds the effect value to the health of every planted plot.
    Health,
    /// Adds the effect value to the growth of every planted plot.
    Growth,
    /// Log only.
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crops_exclude_empty() {
        assert!(!PlantKind::CROPS.contains(&PlantKind::Empty));
        assert!(PlantKind::Empty.is_empty());
        assert!(!PlantKind::Basil.is_empty());
    }

    #[test]
    fn wire_format_matches_dashboard() {
        assert_eq!(
            serde_json::to_string(&PlantKind::Strawberry).ok().as_deref(),
            Some("\"Strawberry\"")
        );
        assert_eq!(
            serde_json::to_string(&Weather::Heatwave).ok().as_deref(),
            Some("\"Heatwave\"")
        );
        assert_eq!(
            serde_json::to_string(&LogKind::Warning).ok().as_deref(),
            Some("\"warning\"")
        );
        let effect: Result<EffectType, _> = serde_json::from_str("\"none\"");
        assert_eq!(effect.ok(), Some(EffectType::None));
    }

    #[test]
    fn display_uses_name() {
        assert_eq!(PlantKind::Carrot.to_string(), "Carrot");
        assert_eq!(Weather::Rainy.to_string(), "Rainy");
    }
}
