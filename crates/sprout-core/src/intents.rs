//! Player intents: plant, water, harvest, remove, and buy water.
//!
//! Each handler either applies its change and logs the success, or leaves
//! the state untouched apart from one warning log. A [`GameError`] is only
//! returned for requests that name a plot or plant the game does not
//! have, and in that case nothing at all is written.
//!
//! Planting happens in two steps because an advisor tip is fetched in
//! between: [`request_planting`] checks affordability, and
//! [`commit_planting`] checks it again against whatever the state has
//! become by the time the tip arrives.

use sprout_types::{GameState, LogKind, PlantKind, Plot};
use sprout_world::catalog;
use sprout_world::plot::{clamp_gauge, harvest_earnings};
use tracing::debug;

use crate::config::EconomyConfig;
use crate::error::GameError;

/// Whether an intent changed anything beyond the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// The intent took effect.
    Applied,
    /// Planting passed its first checks and awaits [`commit_planting`].
    Pending,
    /// A gameplay rule refused the intent.
    Rejected,
}

fn plot_mut(state: &mut GameState, slot: u32) -> Result<&mut Plot, GameError> {
    state
        .plot_mut(slot)
        .ok_or(GameError::UnknownPlot { id: slot })
}

fn ensure_plot(state: &GameState, slot: u32) -> Result<&Plot, GameError> {
    state.plot(slot).ok_or(GameError::UnknownPlot { id: slot })
}

fn reject(state: &mut GameState, message: &str) -> IntentOutcome {
    debug!(day = state.day, reason = message, "Intent rejected");
    state.push_log(LogKind::Warning, message);
    IntentOutcome::Rejected
}

// ---------------------------------------------------------------------------
// Planting
// ---------------------------------------------------------------------------

/// First half of planting: check the plot and the price.
///
/// On success logs that the advisor is being consulted. The caller then
/// fetches a tip and calls [`commit_planting`].
pub fn request_planting(
    state: &mut GameState,
    slot: u32,
    plant: PlantKind,
) -> Result<IntentOutcome, GameError> {
    if plant.is_empty() {
        return Err(GameError::InvalidPlant { plant });
    }
    if !ensure_plot(state, slot)?.is_empty() {
        return Ok(reject(state, "Plot is already planted."));
    }
    if state.money < i64::from(catalog::spec(plant).cost) {
        return Ok(reject(state, "Not enough money for seeds."));
    }
    state.push_log(LogKind::Info, format!("Consulting advisor regarding {plant}..."));
    Ok(IntentOutcome::Pending)
}

/// Second half of planting: log the tip, then sow if still possible.
///
/// The tip is logged whatever happens next. If the money no longer covers
/// the seeds, or the plot was filled in the meantime, the sowing is
/// dropped without a warning.
pub fn commit_planting(
    state: &mut GameState,
    slot: u32,
    plant: PlantKind,
    tip: &str,
    economy: &EconomyConfig,
) -> Result<IntentOutcome, GameError> {
    if plant.is_empty() {
        return Err(GameError::InvalidPlant { plant });
    }
    ensure_plot(state, slot)?;
    state.push_log(LogKind::Info, format!("Advisor tip: {tip}"));

    let cost = i64::from(catalog::spec(plant).cost);
    let day = state.day;
    let affordable = state.money >= cost;
    let plot = plot_mut(state, slot)?;
    if !affordable || !plot.is_empty() {
        debug!(slot, %plant, "Planting dropped after state changed");
        return Ok(IntentOutcome::Rejected);
    }

    *plot = Plot {
        id: plot.id,
        plant,
        growth_stage: 0.0,
        water_level: clamp_gauge(economy.planting_water_level),
        health: 100.0,
        planted_day: day,
    };
    state.money = state.money.saturating_sub(cost);
    state.push_log(LogKind::Success, format!("Planted {plant}."));
    debug!(slot, %plant, cost, money = state.money, "Planted");
    Ok(IntentOutcome::Applied)
}

// ---------------------------------------------------------------------------
// Plot care
// ---------------------------------------------------------------------------

/// Move water from the shared supply into a plot.
pub fn water_slot(
    state: &mut GameState,
    slot: u32,
    economy: &EconomyConfig,
) -> Result<IntentOutcome, GameError> {
    if ensure_plot(state, slot)?.is_empty() {
        return Ok(reject(state, "Nothing planted here."));
    }
    if state.water_supply < economy.watering_cost {
        return Ok(reject(state, "Not enough water in tank!"));
    }
    state.water_supply = state.water_supply.saturating_sub(economy.watering_cost);
    let plot = plot_mut(state, slot)?;
    plot.water_level = clamp_gauge(plot.water_level + economy.watering_amount);
    let level = plot.water_level;
    state.push_log(LogKind::Success, "Watered plant.");
    debug!(slot, level, supply = state.water_supply, "Watered");
    Ok(IntentOutcome::Applied)
}

/// Sell a mature plant and clear its plot.
pub fn harvest_slot(state: &mut GameState, slot: u32) -> Result<IntentOutcome, GameError> {
    let plot = ensure_plot(state, slot)?;
    if !plot.is_mature() {
        return Ok(reject(state, "Not ready for harvest yet."));
    }
    let plant = plot.plant;
    let earnings = harvest_earnings(&catalog::spec(plant), plot.health);

    plot_mut(state, slot)?.clear();
    state.money = state.money.saturating_add(earnings);
    state.push_log(
        LogKind::Success,
        format!("Harvested {plant} for ${earnings}!"),
    );
    debug!(slot, %plant, earnings, money = state.money, "Harvested");
    Ok(IntentOutcome::Applied)
}

/// Clear a plot without refund, whatever it holds.
pub fn remove_slot(state: &mut GameState, slot: u32) -> Result<IntentOutcome, GameError> {
    plot_mut(state, slot)?.clear();
    state.push_log(LogKind::Info, "Cleared plot.");
    debug!(slot, "Cleared");
    Ok(IntentOutcome::Applied)
}

// ---------------------------------------------------------------------------
// Economy
// ---------------------------------------------------------------------------

/// Spend money to refill the shared water supply.
pub fn buy_water(state: &mut GameState, economy: &EconomyConfig) -> IntentOutcome {
    if state.money < economy.water_refill_cost {
        return reject(state, "Not enough money!");
    }
    state.money = state.money.saturating_sub(economy.water_refill_cost);
    state.water_supply = state.water_supply.saturating_add(economy.water_refill_amount);
    state.push_log(
        LogKind::Info,
        format!("Bought {}L of water.", economy.water_refill_amount),
    );
    debug!(money = state.money, supply = state.water_supply, "Bought water");
    IntentOutcome::Applied
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use sprout_types::Weather;

    use super::*;

    fn state(money: i64, water_supply: i64) -> GameState {
        GameState {
            day: 3,
            money,
            water_supply,
            slots: (0..4).map(Plot::empty).collect(),
            logs: Vec::new(),
            weather: Weather::Sunny,
        }
    }

    fn sow(state: &mut GameState, slot: u32, plant: PlantKind) {
        if let Some(plot) = state.plot_mut(slot) {
            plot.plant = plant;
            plot.water_level = 50.0;
            plot.health = 100.0;
        }
    }

    fn last_log(state: &GameState) -> Option<(LogKind, &str)> {
        state.logs.first().map(|l| (l.kind, l.message.as_str()))
    }

    // -- planting --

    #[test]
    fn planting_sows_and_charges() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 200);
        let first = request_planting(&mut state, 1, PlantKind::Tomato);
        assert_eq!(first, Ok(IntentOutcome::Pending));
        assert_eq!(
            last_log(&state),
            Some((LogKind::Info, "Consulting advisor regarding Tomato..."))
        );
        let done = commit_planting(&mut state, 1, PlantKind::Tomato, "Stake it.", &economy);
        assert_eq!(done, Ok(IntentOutcome::Applied));
        assert_eq!(state.money, 85);
        let plot = state.plot(1).cloned().unwrap_or_else(|| Plot::empty(99));
        assert_eq!(plot.plant, PlantKind::Tomato);
        assert_eq!(plot.water_level, 50.0);
        assert_eq!(plot.health, 100.0);
        assert_eq!(plot.growth_stage, 0.0);
        assert_eq!(plot.planted_day, 3);
        let messages: Vec<&str> = state.logs.iter().map(|l| l.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Planted Tomato.",
                "Advisor tip: Stake it.",
                "Consulting advisor regarding Tomato..."
            ]
        );
    }

    #[test]
    fn planting_without_money_warns() {
        let mut state = state(4, 200);
        let outcome = request_planting(&mut state, 0, PlantKind::Basil);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.logs.len(), 1);
        assert_eq!(
            last_log(&state),
            Some((LogKind::Warning, "Not enough money for seeds."))
        );
        assert_eq!(state.money, 4);
    }

    #[test]
    fn planting_exact_cost_is_affordable() {
        let mut state = state(5, 200);
        let outcome = request_planting(&mut state, 0, PlantKind::Basil);
        assert_eq!(outcome, Ok(IntentOutcome::Pending));
    }

    #[test]
    fn planting_on_occupied_plot_warns() {
        let mut state = state(100, 200);
        sow(&mut state, 2, PlantKind::Carrot);
        let outcome = request_planting(&mut state, 2, PlantKind::Basil);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(
            last_log(&state),
            Some((LogKind::Warning, "Plot is already planted."))
        );
    }

    #[test]
    fn commit_drops_silently_when_money_was_spent() {
        let economy = EconomyConfig::default();
        let mut state = state(15, 200);
        let first = request_planting(&mut state, 0, PlantKind::Tomato);
        assert_eq!(first, Ok(IntentOutcome::Pending));

        // Spent while the tip was in flight.
        assert_eq!(buy_water(&mut state, &economy), IntentOutcome::Applied);
        let logs_before = state.logs.len();

        let outcome = commit_planting(&mut state, 0, PlantKind::Tomato, "tip", &economy);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.money, 10);
        assert_eq!(state.plot(0), Some(&Plot::empty(0)));
        // Only the tip was logged; no warning on this path.
        assert_eq!(state.logs.len(), logs_before + 1);
        assert_eq!(last_log(&state), Some((LogKind::Info, "Advisor tip: tip")));
    }

    #[test]
    fn commit_drops_silently_when_plot_was_filled() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 200);
        sow(&mut state, 0, PlantKind::Lettuce);
        let outcome = commit_planting(&mut state, 0, PlantKind::Basil, "tip", &economy);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.money, 100);
        assert_eq!(state.plot(0).map(|p| p.plant), Some(PlantKind::Lettuce));
    }

    #[test]
    fn planting_empty_sentinel_is_an_error() {
        let mut state = state(100, 200);
        let outcome = request_planting(&mut state, 0, PlantKind::Empty);
        assert_eq!(
            outcome,
            Err(GameError::InvalidPlant {
                plant: PlantKind::Empty
            })
        );
        assert!(state.logs.is_empty());
    }

    #[test]
    fn unknown_plot_is_an_error_without_logging() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 200);
        let unknown = Err(GameError::UnknownPlot { id: 9 });
        assert_eq!(request_planting(&mut state, 9, PlantKind::Basil), unknown);
        assert_eq!(water_slot(&mut state, 9, &economy), unknown);
        assert_eq!(harvest_slot(&mut state, 9), unknown);
        assert_eq!(remove_slot(&mut state, 9), unknown);
        assert!(state.logs.is_empty());
    }

    // -- watering --

    #[test]
    fn watering_moves_supply_into_plot() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 200);
        sow(&mut state, 0, PlantKind::Basil);
        let outcome = water_slot(&mut state, 0, &economy);
        assert_eq!(outcome, Ok(IntentOutcome::Applied));
        assert_eq!(state.water_supply, 180);
        assert_eq!(state.plot(0).map(|p| p.water_level), Some(90.0));
        assert_eq!(last_log(&state), Some((LogKind::Success, "Watered plant.")));

        let _ = water_slot(&mut state, 0, &economy);
        assert_eq!(state.plot(0).map(|p| p.water_level), Some(100.0));
    }

    #[test]
    fn watering_with_short_supply_warns_only() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 15);
        sow(&mut state, 0, PlantKind::Basil);
        let before = state.plot(0).cloned();
        let outcome = water_slot(&mut state, 0, &economy);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.water_supply, 15);
        assert_eq!(state.plot(0).cloned(), before);
        assert_eq!(state.logs.len(), 1);
        assert_eq!(
            last_log(&state),
            Some((LogKind::Warning, "Not enough water in tank!"))
        );
    }

    #[test]
    fn watering_empty_plot_keeps_rest_state() {
        let economy = EconomyConfig::default();
        let mut state = state(100, 200);
        let outcome = water_slot(&mut state, 1, &economy);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.water_supply, 200);
        assert_eq!(state.plot(1), Some(&Plot::empty(1)));
    }

    // -- harvesting --

    #[test]
    fn harvest_pays_by_health_and_clears() {
        let mut state = state(100, 200);
        sow(&mut state, 0, PlantKind::Tomato);
        if let Some(plot) = state.plot_mut(0) {
            plot.growth_stage = 100.0;
            plot.health = 80.0;
        }
        let outcome = harvest_slot(&mut state, 0);
        assert_eq!(outcome, Ok(IntentOutcome::Applied));
        assert_eq!(state.money, 140);
        assert_eq!(
            state.plot(0).map(|p| (p.plant, p.growth_stage, p.water_level, p.health)),
            Some((PlantKind::Empty, 0.0, 0.0, 100.0))
        );
        assert_eq!(
            last_log(&state),
            Some((LogKind::Success, "Harvested Tomato for $40!"))
        );
    }

    #[test]
    fn harvest_before_maturity_warns() {
        let mut state = state(100, 200);
        sow(&mut state, 0, PlantKind::Tomato);
        if let Some(plot) = state.plot_mut(0) {
            plot.growth_stage = 99.9;
        }
        let before = state.plot(0).cloned();
        let outcome = harvest_slot(&mut state, 0);
        assert_eq!(outcome, Ok(IntentOutcome::Rejected));
        assert_eq!(state.money, 100);
        assert_eq!(state.plot(0).cloned(), before);
        assert_eq!(
            last_log(&state),
            Some((LogKind::Warning, "Not ready for harvest yet."))
        );
    }

    #[test]
    fn dead_plant_harvests_for_nothing() {
        let mut state = state(100, 200);
        sow(&mut state, 0, PlantKind::Strawberry);
        if let Some(plot) = state.plot_mut(0) {
            plot.growth_stage = 100.0;
            plot.health = 0.0;
        }
        let _ = harvest_slot(&mut state, 0);
        assert_eq!(state.money, 100);
        assert_eq!(
            last_log(&state),
            Some((LogKind::Success, "Harvested Strawberry for $0!"))
        );
    }

    // -- removing --

    #[test]
    fn remove_clears_without_refund() {
        let mut state = state(100, 200);
        sow(&mut state, 3, PlantKind::Strawberry);
        let outcome = remove_slot(&mut state, 3);
        assert_eq!(outcome, Ok(IntentOutcome::Applied));
        assert_eq!(state.money, 100);
        assert!(state.plot(3).is_some_and(Plot::is_empty));
        assert_eq!(last_log(&state), Some((LogKind::Info, "Cleared plot.")));
    }

    // -- buying water --

    #[test]
    fn buying_water_with_three_dollars_fails() {
        let economy = EconomyConfig::default();
        let mut state = state(3, 200);
        assert_eq!(buy_water(&mut state, &economy), IntentOutcome::Rejected);
        assert_eq!(state.money, 3);
        assert_eq!(state.water_supply, 200);
        assert_eq!(state.logs.len(), 1);
        assert_eq!(last_log(&state), Some((LogKind::Warning, "Not enough money!")));
    }

    #[test]
    fn buying_water_with_ten_dollars_succeeds() {
        let economy = EconomyConfig::default();
        let mut state = state(10, 200);
        assert_eq!(buy_water(&mut state, &economy), IntentOutcome::Applied);
        assert_eq!(state.money, 5);
        assert_eq!(state.water_supply, 250);
        assert_eq!(last_log(&state), Some((LogKind::Info, "Bought 50L of water.")));
    }
}
