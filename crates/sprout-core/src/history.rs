//! Per-day money and water supply samples for trend display.

use sprout_types::{GameState, HistorySample};

/// Append-only record of one [`HistorySample`] per day, oldest first.
///
/// Display only; nothing in the simulation reads it back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryRecorder {
    samples: Vec<HistorySample>,
}

impl HistoryRecorder {
    /// Start a history whose first sample describes `state`.
    pub fn starting_at(state: &GameState) -> Self {
        let mut recorder = Self::default();
        recorder.record(state);
        recorder
    }

    /// Append a sample of the state's current day, money, and water supply.
    pub fn record(&mut self, state: &GameState) {
        self.samples.push(HistorySample {
            day: state.day,
            money: state.money,
            water_supply: state.water_supply,
        });
    }

    /// All samples, ordered by day ascending.
    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.last()
    }

    /// Number of samples.
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
