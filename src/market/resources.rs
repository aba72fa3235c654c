//! Market state, quoting, and the price-formation engine.
use std::collections::BTreeMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::goods::{GoodCategory, GoodId, GoodRegistry};

use super::tuning::MarketTuning;

/// Direction of a trade, seen from the player's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeDirection {
    Buy,
    Sell,
}

impl TradeDirection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

/// Error raised when an operation names a good the market does not carry.
#[derive(Debug, Clone, PartialEq)]
pub enum MarketError {
    UnknownGood { good: GoodId },
}

impl fmt::Display for MarketError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownGood { good } => write!(f, "unknown good '{good}'"),
        }
    }
}

impl std::error::Error for MarketError {}

/// Fee-inclusive cost or proceeds for a hypothetical trade.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub good: GoodId,
    pub direction: TradeDirection,
    pub quantity: u32,
    pub unit_price: f32,
    pub gross: f32,
    pub fee: f32,
    /// Total cost for a buy, total proceeds for a sell.
    pub total: f32,
}

/// One price movement produced by a market update.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub good: GoodId,
    pub old_price: f32,
    pub new_price: f32,
}

/// Current city population, supplied by the external city model.
#[derive(Resource, Debug, Clone, Copy)]
pub struct CityPopulation(u32);

impl CityPopulation {
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn count(&self) -> u32 {
        self.0
    }

    pub fn set(&mut self, count: u32) {
        self.0 = count;
    }
}

/// Live supply/demand state for one good.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketEntry {
    pub price: f32,
    pub supply: f32,
    pub demand: f32,
    pub base_demand: f32,
    pub pressure: f32,
    pub pressure_ema: f32,
    pub base_price: f32,
    pub volatility: f32,
    pub min_price: f32,
    pub max_price: f32,
    pub category: GoodCategory,
    pub last_update_day: f64,
}

impl MarketEntry {
    fn recompute_price(&mut self, tuning: &MarketTuning) {
        let volume = self.demand + self.supply;
        let imbalance = if volume > f32::EPSILON {
            (self.demand - self.supply) / volume
        } else {
            0.0
        };
        let raw = self.base_price * (1.0 + tuning.imbalance_gain * self.volatility * imbalance);
        self.price = raw.clamp(self.min_price, self.max_price);
        debug_assert!(self.price >= self.min_price && self.price <= self.max_price);
    }
}

/// The commodity market: one entry per registered good.
///
/// Trades only deposit pressure; prices move exclusively inside `update`,
/// so a single large trade cannot produce a discontinuous jump mid-tick.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Market {
    entries: BTreeMap<GoodId, MarketEntry>,
    elapsed_days: f64,
}

impl Market {
    pub fn from_registry(registry: &GoodRegistry, population: u32, tuning: &MarketTuning) -> Self {
        let mut entries = BTreeMap::new();
        for definition in registry.goods() {
            let base_demand =
                population as f32 * tuning.demand_per_capita(definition.category);
            // Entries open at base price; the first update moves them.
            let entry = MarketEntry {
                price: definition.base_price,
                supply: definition.initial_supply,
                demand: base_demand,
                base_demand,
                pressure: 0.0,
                pressure_ema: 0.0,
                base_price: definition.base_price,
                volatility: definition.volatility,
                min_price: definition.min_price,
                max_price: definition.max_price,
                category: definition.category,
                last_update_day: 0.0,
            };
            entries.insert(definition.id.clone(), entry);
        }

        Self {
            entries,
            elapsed_days: 0.0,
        }
    }

    pub fn entry(&self, good: &GoodId) -> Option<&MarketEntry> {
        self.entries.get(good)
    }

    pub fn price_of(&self, good: &GoodId) -> Option<f32> {
        self.entries.get(good).map(|entry| entry.price)
    }

    pub fn goods(&self) -> impl Iterator<Item = &GoodId> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&GoodId, &MarketEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// Prices a hypothetical trade at the current price plus the
    /// percentage transaction cost, without mutating any state.
    pub fn quote(
        &self,
        good: &GoodId,
        direction: TradeDirection,
        quantity: u32,
        tuning: &MarketTuning,
    ) -> Result<Quote, MarketError> {
        let entry = self
            .entries
            .get(good)
            .ok_or_else(|| MarketError::UnknownGood { good: good.clone() })?;

        let unit_price = entry.price;
        let gross = unit_price * quantity as f32;
        let fee = gross * tuning.fee_percent;
        let total = match direction {
            TradeDirection::Buy => gross + fee,
            TradeDirection::Sell => gross - fee,
        };

        Ok(Quote {
            good: good.clone(),
            direction,
            quantity,
            unit_price,
            gross,
            fee,
            total,
        })
    }

    /// Books an executed trade's effect on supply and trade pressure.
    ///
    /// The price itself is untouched until the next `update`.
    pub fn apply_trade(
        &mut self,
        good: &GoodId,
        direction: TradeDirection,
        quantity: u32,
    ) -> Result<(), MarketError> {
        let entry = self
            .entries
            .get_mut(good)
            .ok_or_else(|| MarketError::UnknownGood { good: good.clone() })?;

        let amount = quantity as f32;
        match direction {
            TradeDirection::Buy => {
                entry.supply = (entry.supply - amount).max(0.0);
                entry.pressure += amount;
            }
            TradeDirection::Sell => {
                entry.supply += amount;
                entry.pressure -= amount;
            }
        }
        Ok(())
    }

    /// Evolves every entry by `elapsed_days` of in-game time.
    ///
    /// Demand relaxes toward base demand, trade pressure decays, the slow
    /// pressure integrator shifts base demand, and the price is recomputed
    /// from the resulting imbalance. Returns every price that moved.
    pub fn update(
        &mut self,
        elapsed_days: f64,
        population: u32,
        tuning: &MarketTuning,
    ) -> Vec<PriceChange> {
        if elapsed_days <= 0.0 {
            return Vec::new();
        }

        self.elapsed_days += elapsed_days;
        let dt = elapsed_days as f32;
        let mut changes = Vec::new();

        for (good, entry) in self.entries.iter_mut() {
            let old_price = entry.price;
            let population_demand =
                population as f32 * tuning.demand_per_capita(entry.category);

            // Slow feedback loop: an exponential moving average of trade
            // pressure shifts base demand, while base demand also relaxes
            // toward the population-derived level. Two first-order lags in
            // series; no per-tick oscillation.
            let ema_blend = 1.0 - (-dt / tuning.pressure_ema_horizon_days).exp();
            entry.pressure_ema += (entry.pressure - entry.pressure_ema) * ema_blend;

            let relax_blend = 1.0 - (-dt / tuning.base_demand_relax_days).exp();
            entry.base_demand += (population_demand - entry.base_demand) * relax_blend;
            entry.base_demand += entry.pressure_ema * tuning.base_demand_gain * dt;
            entry.base_demand = entry.base_demand.clamp(
                population_demand * tuning.min_base_demand_factor,
                population_demand * tuning.max_base_demand_factor,
            );

            let drift_blend = 1.0 - (-dt / tuning.demand_drift_days).exp();
            entry.demand += (entry.base_demand - entry.demand) * drift_blend;
            entry.demand = entry.demand.max(0.0);

            entry.pressure *=
                (-dt * std::f32::consts::LN_2 / tuning.pressure_half_life_days).exp();

            entry.recompute_price(tuning);
            entry.last_update_day = self.elapsed_days;

            if (entry.price - old_price).abs() > f32::EPSILON {
                changes.push(PriceChange {
                    good: good.clone(),
                    old_price,
                    new_price: entry.price,
                });
            }
        }

        changes
    }
}
