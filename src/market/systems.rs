//! Systems driving market setup and per-tick price evolution.
use bevy::prelude::*;

use crate::clock::SimClock;
use crate::goods::GoodRegistry;

use super::{
    events::PriceChangedEvent,
    resources::{CityPopulation, Market},
    tuning::MarketTuning,
};

/// Builds the market from the good registry once the session world exists.
pub fn setup_market(
    mut commands: Commands,
    registry: Res<GoodRegistry>,
    tuning: Res<MarketTuning>,
    population: Res<CityPopulation>,
) {
    let market = Market::from_registry(&registry, population.count(), &tuning);
    info!(
        "Market opened with {} goods for a population of {}",
        market.len(),
        population.count()
    );
    commands.insert_resource(market);
}

/// Evolves prices with the in-game time that passed this tick.
pub fn update_market(
    mut market: ResMut<Market>,
    clock: Res<SimClock>,
    population: Res<CityPopulation>,
    tuning: Res<MarketTuning>,
    mut price_writer: MessageWriter<PriceChangedEvent>,
) {
    let elapsed_days = clock.last_delta_days();
    if elapsed_days <= 0.0 {
        return;
    }

    for change in market.update(elapsed_days, population.count(), &tuning) {
        price_writer.write(PriceChangedEvent {
            good: change.good,
            old_price: change.old_price,
            new_price: change.new_price,
        });
    }
}
