//! Per-plot daily rules: water, health, growth, and harvest value.
//!
//! A planted plot advances one day in three ordered steps, each reading
//! the value the previous step just produced:
//!
//! 1. **Water** -- subtract `water_needs * weather multiplier`, add rain,
//!    clamp to `[0, 100]`.
//! 2. **Health** -- lose [`DROUGHT_DAMAGE`] if the new water level is 0,
//!    lose [`OVERWATER_PENALTY`] if it is above [`OVERWATER_THRESHOLD`]
//!    and it is not raining. Clamp.
//! 3. **Growth** -- gain `100 / days_to_maturity` if the new health is
//!    above [`GROWTH_HEALTH_THRESHOLD`], times [`THRIVING_GROWTH_BONUS`]
//!    above [`THRIVING_HEALTH_THRESHOLD`]. Clamp. Growth never regresses
//!    on its own.
//!
//! Empty plots pass through untouched.

use sprout_types::{GAUGE_MAX, GAUGE_MIN, PlantSpec, Plot, Weather};

use crate::catalog;
use crate::environment;

/// Health lost on a day the plot ends bone dry.
pub const DROUGHT_DAMAGE: f64 = 20.0;

/// Water level above which the plot counts as overwatered.
pub const OVERWATER_THRESHOLD: f64 = 90.0;

/// Health lost on an overwatered, rain-free day.
pub const OVERWATER_PENALTY: f64 = 5.0;

/// Health a plant needs to grow at all.
pub const GROWTH_HEALTH_THRESHOLD: f64 = 50.0;

/// Health above which a plant grows faster.
pub const THRIVING_HEALTH_THRESHOLD: f64 = 90.0;

/// Growth multiplier for thriving plants.
pub const THRIVING_GROWTH_BONUS: f64 = 1.2;

/// Clamp a gauge value into `[0, 100]`.
pub const fn clamp_gauge(value: f64) -> f64 {
    value.clamp(GAUGE_MIN, GAUGE_MAX)
}

/// Water level after one day of consumption and rain.
pub fn next_water_level(water_level: f64, spec: &PlantSpec, weather: Weather) -> f64 {
    let consumption = f64::from(spec.water_needs) * environment::consumption_multiplier(weather);
    clamp_gauge(water_level - consumption + environment::replenishment(weather))
}

/// Health change caused by the (already updated) water level.
pub const fn health_delta(water_level: f64, weather: Weather) -> f64 {
    let mut delta = 0.0;
    if water_level <= GAUGE_MIN {
        delta -= DROUGHT_DAMAGE;
    }
    if water_level > OVERWATER_THRESHOLD && !environment::excuses_overwatering(weather) {
        delta -= OVERWATER_PENALTY;
    }
    delta
}

/// Growth gained today given the (already updated) health.
pub fn growth_increment(health: f64, spec: &PlantSpec) -> f64 {
    if health <= GROWTH_HEALTH_THRESHOLD || spec.days_to_maturity == 0 {
        return 0.0;
    }
    let base = GAUGE_MAX / f64::from(spec.days_to_maturity);
    if health > THRIVING_HEALTH_THRESHOLD {
        base * THRIVING_GROWTH_BONUS
    } else {
        base
    }
}

/// Advance a single plot by one day under the given weather.
pub fn grow_plot(plot: &Plot, weather: Weather) -> Plot {
    if plot.is_empty() {
        return plot.clone();
    }
    let spec = catalog::spec(plot.plant);

    let water_level = next_water_level(plot.water_level, &spec, weather);
    let health = clamp_gauge(plot.health + health_delta(water_level, weather));
    let growth_stage = clamp_gauge(plot.growth_stage + growth_increment(health, &spec));

    Plot {
        water_level,
        health,
        growth_stage,
        ..plot.clone()
    }
}

/// Money earned by harvesting a plant at the given health.
///
/// `floor(value * health / 100)`, never negative.
#[allow(clippy::cast_possible_truncation)]
pub fn harvest_earnings(spec: &PlantSpec, health: f64) -> i64 {
    let quality = clamp_gauge(health) / GAUGE_MAX;
    // Bounded by `u32::MAX`, so the cast is exact.
    (f64::from(spec.value) * quality).floor() as i64
}
