//! Configuration loading and typed config structures for Urban Sprout.
//!
//! The canonical configuration lives in `sprout-config.yaml` at the working
//! directory root. Every section and key is optional: a missing file, an
//! empty file, or a partial file all fall back to the stock game values.
//! Loaded configs are validated before the game starts.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default config file name, looked up relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "sprout-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
///
/// Mirrors the structure of `sprout-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Garden layout.
    #[serde(default)]
    pub garden: GardenConfig,

    /// Starting balances and intent prices.
    #[serde(default)]
    pub economy: EconomyConfig,

    /// Deadlines for advisor calls.
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Randomness settings.
    #[serde(default)]
    pub simulation: SimulationSettings,

    /// Observer server binding.
    #[serde(default)]
    pub infrastructure: InfrastructureConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `OBSERVER_PORT` overrides `infrastructure.observer_port`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.infrastructure.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if it exists, otherwise start from defaults.
    ///
    /// Environment overrides and validation apply either way.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            return Self::from_file(path);
        }
        let mut config = Self::default();
        config.infrastructure.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults. The environment is not
    /// consulted.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.garden.grid_size == 0 {
            return Err(invalid("garden.grid_size", "must be at least 1"));
        }
        self.economy.validate()?;
        if self.infrastructure.observer_port == 0 {
            return Err(invalid("infrastructure.observer_port", "must be non-zero"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

/// Garden layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GardenConfig {
    /// Number of plots in the grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: u32,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
        }
    }
}

/// Starting balances and the prices of the economy intents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EconomyConfig {
    /// Money at session start.
    #[serde(default = "default_initial_money")]
    pub initial_money: i64,

    /// Water supply at session start.
    #[serde(default = "default_initial_water")]
    pub initial_water: i64,

    /// Money spent per water purchase.
    #[serde(default = "default_water_refill_cost")]
    pub water_refill_cost: i64,

    /// Supply added per water purchase.
    #[serde(default = "default_water_refill_amount")]
    pub water_refill_amount: i64,

    /// Supply spent per watering.
    #[serde(default = "default_watering_cost")]
    pub watering_cost: i64,

    /// Plot water level added per watering.
    #[serde(default = "default_watering_amount")]
    pub watering_amount: f64,

    /// Plot water level of a freshly sown plant.
    #[serde(default = "default_planting_water_level")]
    pub planting_water_level: f64,
}

impl EconomyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let counts = [
            ("economy.initial_money", self.initial_money),
            ("economy.initial_water", self.initial_water),
            ("economy.water_refill_cost", self.water_refill_cost),
            ("economy.water_refill_amount", self.water_refill_amount),
            ("economy.watering_cost", self.watering_cost),
        ];
        for (field, value) in counts {
            if value < 0 {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }
        let gauges = [
            ("economy.watering_amount", self.watering_amount),
            ("economy.planting_water_level", self.planting_water_level),
        ];
        for (field, value) in gauges {
            if !(0.0..=100.0).contains(&value) {
                return Err(invalid(field, format!("must be within 0..=100, got {value}")));
            }
        }
        Ok(())
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            initial_money: default_initial_money(),
            initial_water: default_initial_water(),
            water_refill_cost: default_water_refill_cost(),
            water_refill_amount: default_water_refill_amount(),
            watering_cost: default_watering_cost(),
            watering_amount: default_watering_amount(),
            planting_water_level: default_planting_water_level(),
        }
    }
}

/// Deadlines after which an advisor call counts as failed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AdvisorConfig {
    /// Daily event deadline in milliseconds.
    #[serde(default = "default_event_timeout_ms")]
    pub event_timeout_ms: u64,

    /// Planting tip deadline in milliseconds.
    #[serde(default = "default_tip_timeout_ms")]
    pub tip_timeout_ms: u64,

    /// Chat answer deadline in milliseconds.
    #[serde(default = "default_chat_timeout_ms")]
    pub chat_timeout_ms: u64,
}

impl AdvisorConfig {
    /// Daily event deadline.
    pub const fn event_timeout(&self) -> Duration {
        Duration::from_millis(self.event_timeout_ms)
    }

    /// Planting tip deadline.
    pub const fn tip_timeout(&self) -> Duration {
        Duration::from_millis(self.tip_timeout_ms)
    }

    /// Chat answer deadline.
    pub const fn chat_timeout(&self) -> Duration {
        Duration::from_millis(self.chat_timeout_ms)
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            event_timeout_ms: default_event_timeout_ms(),
            tip_timeout_ms: default_tip_timeout_ms(),
            chat_timeout_ms: default_chat_timeout_ms(),
        }
    }
}

/// Randomness settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SimulationSettings {
    /// Seed for the fallback weather generator. `None` uses OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Observer server binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InfrastructureConfig {
    /// Interface the observer binds to.
    #[serde(default = "default_observer_host")]
    pub observer_host: String,

    /// Port the observer listens on.
    #[serde(default = "default_observer_port")]
    pub observer_port: u16,
}

impl InfrastructureConfig {
    /// Override the observer port with `OBSERVER_PORT` when set.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through an arbitrary variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("OBSERVER_PORT") {
            self.observer_port = val.trim().parse().map_err(|e| {
                invalid("OBSERVER_PORT", format!("not a port number ({val}): {e}"))
            })?;
        }
        Ok(())
    }

    /// `host:port` string for binding the observer listener.
    pub fn observer_addr(&self) -> String {
        format!("{}:{}", self.observer_host, self.observer_port)
    }
}

impl Default for InfrastructureConfig {
    fn default() -> Self {
        Self {
            observer_host: default_observer_host(),
            observer_port: default_observer_port(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_grid_size() -> u32 {
    9
}

const fn default_initial_money() -> i64 {
    100
}

const fn default_initial_water() -> i64 {
    200
}

const fn default_water_refill_cost() -> i64 {
    5
}

const fn default_water_refill_amount() -> i64 {
    50
}

const fn default_watering_cost() -> i64 {
    20
}

const fn default_watering_amount() -> f64 {
    40.0
}

const fn default_planting_water_level() -> f64 {
    50.0
}

const fn default_event_timeout_ms() -> u64 {
    8_000
}

const fn default_tip_timeout_ms() -> u64 {
    5_000
}

const fn default_chat_timeout_ms() -> u64 {
    8_000
}

fn default_observer_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_observer_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_owned()
}
