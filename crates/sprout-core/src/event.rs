//! Merging the day's external event into the post-growth state.
//!
//! With an event: log it, apply its weather change, then apply its effect
//! exactly once. Without one: roll the next weather from the fallback
//! cycle and change nothing else. Money and water supply effects are not
//! floored, so a harsh event can leave either negative.

use sprout_types::{DailyEvent, EffectType, GameState, LogKind, Weather};
use sprout_world::FallbackWeather;
use sprout_world::plot::clamp_gauge;

/// Which branch the merge took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// The external event was applied.
    Applied(DailyEvent),
    /// No event was available; the weather was rolled instead.
    Fallback(Weather),
}

impl EventOutcome {
    /// Whether an external event was applied.
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

/// Merge an optional daily event into `state`.
pub fn merge_daily_event(
    state: &mut GameState,
    event: Option<DailyEvent>,
    fallback: &mut FallbackWeather,
) -> EventOutcome {
    let Some(event) = event else {
        let weather = fallback.roll();
        state.weather = weather;
        return EventOutcome::Fallback(weather);
    };

    state.push_log(
        LogKind::Event,
        format!("Event: {} - {}", event.title, event.description),
    );
    if let Some(weather) = event.weather_change {
        state.weather = weather;
    }
    apply_effect(state, event.effect_type, event.effect_value);
    EventOutcome::Applied(event)
}

/// Effect values are small game deltas; precision loss needs |value| > 2^53.
#[allow(clippy::cast_precision_loss)]
const fn gauge_delta(value: i64) -> f64 {
    value as f64
}

fn apply_effect(state: &mut GameState, effect: EffectType, value: i64) {
    match effect {
        EffectType::Money => state.money = state.money.saturating_add(value),
        EffectType::Water => state.water_supply = state.water_supply.saturating_add(value),
        EffectType::Health => {
            let delta = gauge_delta(value);
            for plot in state.slots.iter_mut().filter(|p| !p.is_empty()) {
                plot.health = clamp_gauge(plot.health + delta);
            }
        }
        EffectType::Growth => {
            let delta = gauge_delta(value);
            for plot in state.slots.iter_mut().filter(|p| !p.is_empty()) {
                plot.growth_stage = clamp_gauge(plot.growth_stage + delta);
            }
        }
        EffectType::None => {}
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use sprout_types::{PlantKind, Plot};

    use super::*;

    fn state() -> GameState {
        let mut slots: Vec<Plot> = (0..3).map(Plot::empty).collect();
        if let Some(plot) = slots.first_mut() {
            plot.plant = PlantKind::Basil;
            plot.water_level = 40.0;
            plot.health = 70.0;
            plot.growth_stage = 95.0;
        }
        GameState {
            day: 2,
            money: 100,
            water_supply: 200,
            slots,
            logs: Vec::new(),
            weather: Weather::Sunny,
        }
    }

    fn event(effect_type: EffectType, effect_value: i64) -> DailyEvent {
        DailyEvent {
            title: "Pigeon Raid".to_owned(),
            description: "Pigeons visit the roof.".to_owned(),
            effect_type,
            effect_value,
            weather_change: None,
        }
    }

    #[test]
    fn event_is_logged_once_with_current_day() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        let outcome = merge_daily_event(&mut state, Some(event(EffectType::None, 0)), &mut fallback);
        assert!(outcome.is_applied());
        assert_eq!(state.logs.len(), 1);
        let log = state.logs.first();
        assert_eq!(log.map(|l| l.kind), Some(LogKind::Event));
        assert_eq!(log.map(|l| l.day), Some(2));
        assert_eq!(
            log.map(|l| l.message.as_str()),
            Some("Event: Pigeon Raid - Pigeons visit the roof.")
        );
        assert_eq!(state.money, 100);
        assert_eq!(state.water_supply, 200);
    }

    #[test]
    fn weather_change_overrides_weather() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        let mut storm = event(EffectType::None, 0);
        storm.weather_change = Some(Weather::Rainy);
        merge_daily_event(&mut state, Some(storm), &mut fallback);
        assert_eq!(state.weather, Weather::Rainy);
    }

    #[test]
    fn event_without_weather_change_keeps_weather() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        merge_daily_event(&mut state, Some(event(EffectType::Water, 10)), &mut fallback);
        assert_eq!(state.weather, Weather::Sunny);
        assert_eq!(state.water_supply, 210);
    }

    #[test]
    fn money_effect_may_go_negative() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        merge_daily_event(&mut state, Some(event(EffectType::Money, -150)), &mut fallback);
        assert_eq!(state.money, -50);
    }

    #[test]
    fn health_effect_hits_planted_plots_only_and_clamps() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        merge_daily_event(&mut state, Some(event(EffectType::Health, 50)), &mut fallback);
        assert_eq!(state.slots.first().map(|p| p.health), Some(100.0));
        assert_eq!(state.slots.get(1), Some(&Plot::empty(1)));
    }

    #[test]
    fn growth_effect_clamps_both_ways() {
        let mut state = state();
        let mut fallback = FallbackWeather::new(Some(1));
        merge_daily_event(&mut state, Some(event(EffectType::Growth, 10)), &mut fallback);
        assert_eq!(state.slots.first().map(|p| p.growth_stage), Some(100.0));
        merge_daily_event(&mut state, Some(event(EffectType::Growth, -250)), &mut fallback);
        assert_eq!(state.slots.first().map(|p| p.growth_stage), Some(0.0));
        assert_eq!(state.slots.get(2), Some(&Plot::empty(2)));
    }

    #[test]
    fn fallback_only_changes_weather() {
        let mut state = state();
        let before = state.clone();
        let mut fallback = FallbackWeather::new(Some(5));
        let mut expected = FallbackWeather::new(Some(5));
        let outcome = merge_daily_event(&mut state, None, &mut fallback);
        let rolled = expected.roll();
        assert_eq!(outcome, EventOutcome::Fallback(rolled));
        assert_eq!(state.weather, rolled);
        assert_eq!(state.slots, before.slots);
        assert_eq!(state.money, before.money);
        assert_eq!(state.water_supply, before.water_supply);
        assert!(state.logs.is_empty());
    }
}
