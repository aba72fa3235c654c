//! Systems feeding the statistics ledger.
use bevy::prelude::*;

use crate::clock::DayBoundaryEvent;
use crate::depot::Depot;
use crate::market::Market;
use crate::trade::TradeExecutedEvent;

use super::{events::StatSampleRecordedEvent, ledger::StatsLedger};

/// Accumulates executed trade volume for the day's sample.
pub fn accumulate_trade_volume(
    mut ledger: ResMut<StatsLedger>,
    mut trades: MessageReader<TradeExecutedEvent>,
) {
    for event in trades.read() {
        ledger.record_trade_volume(event.receipt.quantity);
    }
}

/// Appends one wealth sample per day boundary.
pub fn record_daily_samples(
    mut ledger: ResMut<StatsLedger>,
    depot: Res<Depot>,
    market: Res<Market>,
    mut days: MessageReader<DayBoundaryEvent>,
    mut sample_writer: MessageWriter<StatSampleRecordedEvent>,
) {
    for event in days.read() {
        if let Some(sample) = ledger.record_daily_sample(event.day, &depot, &market) {
            debug!(
                "Day {}: recorded wealth {:.2} ({} units traded)",
                sample.day, sample.wealth, sample.trade_volume
            );
            sample_writer.write(StatSampleRecordedEvent {
                day: sample.day,
                wealth: sample.wealth,
            });
        }
    }
}
