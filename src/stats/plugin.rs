//! StatsPlugin wires daily bookkeeping into the loop.
use bevy::prelude::*;

use crate::depot::systems::deduct_cost_of_living;
use crate::market::update_market;
use crate::trade::systems::drain_order_queue;

use super::{
    events::StatSampleRecordedEvent,
    ledger::StatsLedger,
    systems::{accumulate_trade_volume, record_daily_samples},
};

pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StatsLedger>()
            .add_event::<StatSampleRecordedEvent>()
            .add_systems(
                Update,
                (
                    accumulate_trade_volume.after(drain_order_queue),
                    record_daily_samples
                        .after(accumulate_trade_volume)
                        .after(deduct_cost_of_living)
                        .after(update_market),
                ),
            );
    }
}
