//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop the engine during
//! startup or shutdown, so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sprout_core::ConfigError,
    },

    /// The garden API server failed to start.
    #[error("observer error: {source}")]
    Observer {
        /// The underlying server error.
        #[from]
        source: sprout_observer::ServerError,
    },

    /// Waiting for the shutdown signal failed.
    #[error("signal error: {message}")]
    Signal {
        /// Description of the failure.
        message: String,
    },
}
