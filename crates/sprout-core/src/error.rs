//! Error types for misuse of the game boundary.
//!
//! Gameplay failures (not enough money, not ready to harvest) are not
//! errors: they are recorded as warning log entries and leave the rest of
//! the state untouched. [`GameError`] only covers requests the game cannot
//! even interpret, plus the game service having shut down.

use sprout_types::PlantKind;

/// A request that was rejected before touching the game state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No plot has this id.
    #[error("no plot with id {id}")]
    UnknownPlot {
        /// The requested plot id.
        id: u32,
    },

    /// The requested plant cannot be sown.
    #[error("{plant} cannot be planted")]
    InvalidPlant {
        /// The requested plant.
        plant: PlantKind,
    },

    /// The game service task has stopped and no longer accepts commands.
    #[error("game service is not running")]
    ServiceStopped,
}
