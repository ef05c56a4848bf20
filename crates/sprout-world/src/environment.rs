//! Weather effects and the fallback weather generator.
//!
//! Weather changes how much water a plot drinks in a day and whether rain
//! refills it. Normally the daily event decides tomorrow's weather; when no
//! event is available the [`FallbackWeather`] generator rolls one from a
//! fixed five-entry cycle:
//!
//! | Weather  | Entries | Chance |
//! |----------|---------|--------|
//! | Sunny    | 2       | 40%    |
//! | Cloudy   | 1       | 20%    |
//! | Rainy    | 1       | 20%    |
//! | Heatwave | 1       | 20%    |

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sprout_types::Weather;

/// Consumption multiplier during a heatwave.
pub const HEATWAVE_CONSUMPTION_MULTIPLIER: f64 = 1.5;

/// Consumption multiplier while it rains.
pub const RAIN_CONSUMPTION_MULTIPLIER: f64 = 0.1;

/// Water added to every planted plot on a rainy day.
pub const RAIN_REPLENISHMENT: f64 = 30.0;

/// Weather cycle sampled uniformly when no daily event is available.
/// Sunny appears twice, so it is twice as likely as the others.
pub const FALLBACK_WEATHER_CYCLE: [Weather; 5] = [
    Weather::Sunny,
    Weather::Cloudy,
    Weather::Rainy,
    Weather::Sunny,
    Weather::Heatwave,
];

/// Factor applied to a plant's baseline water needs.
pub const fn consumption_multiplier(weather: Weather) -> f64 {
    match weather {
        Weather::Heatwave => HEATWAVE_CONSUMPTION_MULTIPLIER,
        Weather::Rainy => RAIN_CONSUMPTION_MULTIPLIER,
        Weather::Sunny | Weather::Cloudy => 1.0,
    }
}

/// Water the sky adds to a plot today.
pub const fn replenishment(weather: Weather) -> f64 {
    match weather {
        Weather::Rainy => RAIN_REPLENISHMENT,
        Weather::Sunny | Weather::Cloudy | Weather::Heatwave => 0.0,
    }
}

/// Whether the overwatering penalty is waived.
pub const fn excuses_overwatering(weather: Weather) -> bool {
    matches!(weather, Weather::Rainy)
}

/// Random weather source used when the event generator has nothing.
///
/// Seeded runs are reproducible: the same seed yields the same sequence.
#[derive(Debug, Clone)]
pub struct FallbackWeather {
    rng: StdRng,
}

impl FallbackWeather {
    /// Create a generator. `None` seeds from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng }
    }

    /// Pick the next weather uniformly from [`FALLBACK_WEATHER_CYCLE`].
    pub fn roll(&mut self) -> Weather {
        let idx = self.rng.random_range(0..FALLBACK_WEATHER_CYCLE.len());
        FALLBACK_WEATHER_CYCLE
            .get(idx)
            .copied()
            .unwrap_or(Weather::Sunny)
    }
}
