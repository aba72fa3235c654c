//! Systems draining the order queue through the transaction engine.
use bevy::prelude::*;

use crate::clock::SimClock;
use crate::depot::Depot;
use crate::market::{Market, MarketTuning};

use super::{
    engine::execute,
    events::{TradeExecutedEvent, TradeRejectedEvent},
    orders::OrderQueue,
};

/// Executes every order submitted since the previous tick.
///
/// Runs at the start of the simulation step, before the clock and market
/// advance, so orders submitted from within update callbacks are always
/// deferred to the next tick.
pub fn drain_order_queue(
    mut queue: ResMut<OrderQueue>,
    mut depot: ResMut<Depot>,
    mut market: ResMut<Market>,
    clock: Res<SimClock>,
    tuning: Res<MarketTuning>,
    mut executed_writer: MessageWriter<TradeExecutedEvent>,
    mut rejected_writer: MessageWriter<TradeRejectedEvent>,
) {
    for pending in queue.take_pending() {
        match execute(
            &pending.order,
            clock.day_count(),
            &mut depot,
            &mut market,
            &tuning,
        ) {
            Ok(receipt) => {
                debug!(
                    "Order {} executed: {} {} {} for {:.2}",
                    pending.id,
                    receipt.direction.label(),
                    receipt.quantity,
                    receipt.good,
                    receipt.total,
                );
                queue.record_executed();
                executed_writer.write(TradeExecutedEvent {
                    id: pending.id,
                    receipt,
                });
            }
            Err(reason) => {
                debug!("Order {} rejected: {reason}", pending.id);
                queue.record_rejected();
                rejected_writer.write(TradeRejectedEvent {
                    id: pending.id,
                    order: pending.order,
                    reason,
                });
            }
        }
    }
}
