//! The whole-garden day transition.
//!
//! Applies the per-plot rules from [`sprout_world::plot`] to every plot
//! under the current weather and moves the calendar forward by one day.
//! This runs before any daily event is considered; the event merge reads
//! the result.

use sprout_types::GameState;
use sprout_world::grow_plot;

/// Advance every plot by one day and increment `day`.
///
/// Weather, money, water supply, and logs are left untouched.
pub fn advance_day(state: &mut GameState) {
    let weather = state.weather;
    for plot in &mut state.slots {
        *plot = grow_plot(plot, weather);
    }
    state.day = state.day.saturating_add(1);
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use sprout_types::{PlantKind, Plot, Weather};

    use super::*;

    fn garden(weather: Weather) -> GameState {
        let mut slots: Vec<Plot> = (0..4).map(Plot::empty).collect();
        for (plot, plant) in slots
            .iter_mut()
            .zip([PlantKind::Tomato, PlantKind::Lettuce, PlantKind::Strawberry])
        {
            plot.plant = plant;
            plot.water_level = 50.0;
            plot.health = 100.0;
        }
        GameState {
            day: 1,
            money: 100,
            water_supply: 200,
            slots,
            logs: Vec::new(),
            weather,
        }
    }

    #[test]
    fn increments_day_and_keeps_resources() {
        let mut state = garden(Weather::Sunny);
        advance_day(&mut state);
        assert_eq!(state.day, 2);
        assert_eq!(state.money, 100);
        assert_eq!(state.water_supply, 200);
        assert_eq!(state.weather, Weather::Sunny);
        assert!(state.logs.is_empty());
    }

    #[test]
    fn every_planted_plot_consumes_water() {
        let mut state = garden(Weather::Heatwave);
        advance_day(&mut state);
        let levels: Vec<f64> = state.slots.iter().map(|p| p.water_level).collect();
        // Tomato 15 * 1.5, Lettuce 20 * 1.5, Strawberry 25 * 1.5, Empty untouched.
        assert_eq!(levels, vec![27.5, 20.0, 12.5, 0.0]);
    }

    #[test]
    fn empty_plots_stay_at_rest() {
        let mut state = garden(Weather::Rainy);
        advance_day(&mut state);
        assert_eq!(state.slots.get(3), Some(&Plot::empty(3)));
    }

    #[test]
    fn gauges_stay_in_range_over_a_season() {
        for weather in Weather::ALL {
            let mut state = garden(weather);
            for _ in 0..60 {
                advance_day(&mut state);
                for plot in &state.slots {
                    assert!((0.0..=100.0).contains(&plot.water_level));
                    assert!((0.0..=100.0).contains(&plot.health));
                    assert!((0.0..=100.0).contains(&plot.growth_stage));
                }
            }
            assert_eq!(state.day, 61);
        }
    }
}
