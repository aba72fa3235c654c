//! MarketPlugin wires price formation into the simulation loop.
use bevy::prelude::*;
#[cfg(feature = "econ_debug")]
use bevy::time::TimerMode;

use crate::clock::advance_sim_clock;

use super::{
    events::PriceChangedEvent,
    resources::CityPopulation,
    systems::{setup_market, update_market},
    tuning::MarketTuning,
};

#[cfg(feature = "econ_debug")]
#[derive(Resource)]
struct MarketDebugTimer {
    timer: Timer,
}

#[cfg(feature = "econ_debug")]
impl Default for MarketDebugTimer {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(1.0, TimerMode::Repeating),
        }
    }
}

pub struct MarketPlugin;

impl Plugin for MarketPlugin {
    fn build(&self, app: &mut App) {
        let tuning = MarketTuning::load_or_default();
        info!(
            "Market tuning: fee {:.1}%, imbalance gain {:.2}, pressure half-life {:.1}d",
            tuning.fee_percent * 100.0,
            tuning.imbalance_gain,
            tuning.pressure_half_life_days
        );

        app.insert_resource(CityPopulation::new(tuning.default_population))
            .insert_resource(tuning)
            .add_event::<PriceChangedEvent>()
            .add_systems(Startup, setup_market)
            .add_systems(Update, update_market.after(advance_sim_clock));

        #[cfg(feature = "econ_debug")]
        {
            app.insert_resource(MarketDebugTimer::default())
                .add_systems(Update, log_market_state.after(update_market));
        }
    }
}

#[cfg(feature = "econ_debug")]
fn log_market_state(
    mut debug_timer: ResMut<MarketDebugTimer>,
    time: Res<Time>,
    market: Res<super::resources::Market>,
) {
    if debug_timer.timer.tick(time.delta()).just_finished() {
        for (good, entry) in market.entries() {
            debug!(
                target: "econ_debug",
                "{good}: price {:.2} | supply {:.0} | demand {:.0} | pressure {:.1}",
                entry.price,
                entry.supply,
                entry.demand,
                entry.pressure,
            );
        }
    }
}
