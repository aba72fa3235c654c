//! TradePlugin wires order submission and execution into the loop.
use bevy::prelude::*;

use crate::clock::advance_sim_clock;

use super::{
    events::{TradeExecutedEvent, TradeRejectedEvent},
    orders::OrderQueue,
    systems::drain_order_queue,
};

pub struct TradePlugin;

impl Plugin for TradePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrderQueue>()
            .add_event::<TradeExecutedEvent>()
            .add_event::<TradeRejectedEvent>()
            .add_systems(Update, drain_order_queue.before(advance_sim_clock));
    }
}
