//! Append-only ledger of daily wealth and inventory samples.
use std::collections::BTreeMap;

use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::depot::Depot;
use crate::goods::GoodId;
use crate::market::Market;

/// One daily bookkeeping snapshot. Appended on day boundaries, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSample {
    pub day: u64,
    pub cash: f32,
    pub inventory_value: f32,
    /// Cash plus inventory valued at the market price of the day.
    pub wealth: f32,
    /// Units traded since the previous sample.
    pub trade_volume: u32,
    pub holdings: BTreeMap<GoodId, u32>,
}

/// Time-bucketed history of wealth, inventory value, and trade volume.
///
/// History is never deleted within a session.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsLedger {
    samples: Vec<StatSample>,
    pending_volume: u32,
    last_sampled_day: Option<u64>,
}

impl StatsLedger {
    /// Accumulates executed trade volume for the next daily sample.
    pub fn record_trade_volume(&mut self, quantity: u32) {
        self.pending_volume = self.pending_volume.saturating_add(quantity);
    }

    /// Appends the sample for `day`, valuing inventory at current market
    /// prices. Guarded so each day is sampled exactly once no matter how
    /// many advance calls straddle its boundary.
    pub fn record_daily_sample(
        &mut self,
        day: u64,
        depot: &Depot,
        market: &Market,
    ) -> Option<&StatSample> {
        if self.last_sampled_day == Some(day) {
            return None;
        }

        let mut holdings = BTreeMap::new();
        let mut inventory_value = 0.0;
        for (good, quantity) in depot.holdings() {
            holdings.insert(good.clone(), quantity);
            inventory_value += quantity as f32 * market.price_of(good).unwrap_or(0.0);
        }

        let cash = depot.cash();
        self.samples.push(StatSample {
            day,
            cash,
            inventory_value,
            wealth: cash + inventory_value,
            trade_volume: self.pending_volume,
            holdings,
        });
        self.pending_volume = 0;
        self.last_sampled_day = Some(day);
        self.samples.last()
    }

    pub fn samples(&self) -> &[StatSample] {
        &self.samples
    }

    /// Lazy, restartable view over the samples of an inclusive day range.
    pub fn samples_in_range(
        &self,
        start_day: u64,
        end_day: u64,
    ) -> impl Iterator<Item = &StatSample> {
        self.samples
            .iter()
            .filter(move |sample| sample.day >= start_day && sample.day <= end_day)
    }

    pub fn latest(&self) -> Option<&StatSample> {
        self.samples.last()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
