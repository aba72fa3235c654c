//! Complete, order-independent serialization of the session state.
//!
//! The good registry is deliberately excluded: it is static configuration
//! reloaded from its definitions, not save data.
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::clock::SimClock;
use crate::depot::Depot;
use crate::market::Market;
use crate::stats::StatsLedger;

/// Errors raised while encoding, decoding, or validating a snapshot.
#[derive(Debug, Clone)]
pub enum SnapshotError {
    Encode { message: String },
    Decode { message: String },
    Invariant { message: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode { message } => write!(f, "snapshot encode failed: {message}"),
            Self::Decode { message } => write!(f, "snapshot decode failed: {message}"),
            Self::Invariant { message } => write!(f, "snapshot violates invariant: {message}"),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Serializable snapshot of every session-scoped component.
///
/// Restoring reconstructs identical invariants without re-running
/// historical ticks; snapshots that would break them are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub clock: SimClock,
    pub depot: Depot,
    pub market: Market,
    pub stats: StatsLedger,
}

impl SaveState {
    pub fn capture(
        clock: &SimClock,
        depot: &Depot,
        market: &Market,
        stats: &StatsLedger,
    ) -> Self {
        Self {
            clock: clock.clone(),
            depot: depot.clone(),
            market: market.clone(),
            stats: stats.clone(),
        }
    }

    /// Replaces the live session state with this snapshot.
    pub fn apply(
        self,
        clock: &mut SimClock,
        depot: &mut Depot,
        market: &mut Market,
        stats: &mut StatsLedger,
    ) -> Result<(), SnapshotError> {
        self.validate()?;
        *clock = self.clock;
        *depot = self.depot;
        *market = self.market;
        *stats = self.stats;
        Ok(())
    }

    /// Checks the invariants a restored session must satisfy.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let used = self.depot.used_storage();
        if used > self.depot.capacity() {
            return Err(SnapshotError::Invariant {
                message: format!(
                    "depot stores {used} units but capacity is {}",
                    self.depot.capacity()
                ),
            });
        }
        if self.depot.cash() < 0.0 {
            return Err(SnapshotError::Invariant {
                message: format!("depot cash {:.2} is negative", self.depot.cash()),
            });
        }

        for (good, entry) in self.market.entries() {
            if entry.price < entry.min_price || entry.price > entry.max_price {
                return Err(SnapshotError::Invariant {
                    message: format!(
                        "price {:.2} of '{good}' outside [{:.2}, {:.2}]",
                        entry.price, entry.min_price, entry.max_price
                    ),
                });
            }
            if entry.supply < 0.0 || entry.demand < 0.0 {
                return Err(SnapshotError::Invariant {
                    message: format!("'{good}' has negative supply or demand"),
                });
            }
        }

        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|err| SnapshotError::Encode {
            message: err.to_string(),
        })
    }

    pub fn from_json(data: &str) -> Result<Self, SnapshotError> {
        let state: Self = serde_json::from_str(data).map_err(|err| SnapshotError::Decode {
            message: err.to_string(),
        })?;
        state.validate()?;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ClockSettings;
    use crate::goods::{
        data::{GoodConfig, GoodsConfig},
        GoodCategory, GoodId, GoodRegistry,
    };
    use crate::market::{MarketTuning, TradeDirection};
    use crate::trade::{execute, Order};

    fn clock_settings() -> ClockSettings {
        ClockSettings {
            seconds_per_day: 10.0,
            default_time_scale: 1.0,
            min_time_scale: 0.001,
            max_time_scale: 125.0,
            speed_step: 5.0,
        }
    }

    fn tuning() -> MarketTuning {
        MarketTuning {
            fee_percent: 0.25,
            default_population: 120,
            food_per_capita: 1.0,
            raw_material_per_capita: 1.0,
            craft_per_capita: 1.0,
            luxury_per_capita: 1.0,
            ..MarketTuning::default()
        }
    }

    // A session with a little of everything: elapsed time, executed
    // trades, moved prices, and recorded samples.
    fn session() -> (SimClock, Depot, Market, StatsLedger) {
        let settings = clock_settings();
        let tuning = tuning();
        let registry = GoodRegistry::from_config(GoodsConfig {
            goods: vec![GoodConfig {
                symbol: "grain".to_string(),
                name: "Grain".to_string(),
                category: GoodCategory::Food,
                base_price: 10.0,
                volatility: 1.0,
                min_price: None,
                max_price: None,
                market_supply: 100.0,
            }],
        })
        .unwrap();

        let mut clock = SimClock::new(&settings);
        let mut depot = Depot::new(200.0, 100);
        let mut market = Market::from_registry(&registry, 120, &tuning);
        let mut stats = StatsLedger::default();

        execute(&Order::buy("grain", 4), 0, &mut depot, &mut market, &tuning).unwrap();
        let crossings = clock.advance(15.0, &settings).unwrap();
        market.update(clock.last_delta_days(), 120, &tuning);
        for day in crossings.days {
            stats.record_daily_sample(day, &depot, &market);
        }

        (clock, depot, market, stats)
    }

    #[test]
    fn round_trip_preserves_observable_state() {
        let (clock, depot, market, stats) = session();
        let grain = GoodId::from("grain");

        let json = SaveState::capture(&clock, &depot, &market, &stats)
            .to_json()
            .unwrap();
        let restored = SaveState::from_json(&json).unwrap();

        let settings = clock_settings();
        let mut clock_r = SimClock::new(&settings);
        let mut depot_r = Depot::new(0.0, 1);
        let mut market_r = Market::from_registry(
            &GoodRegistry::from_config(GoodsConfig {
                goods: vec![GoodConfig {
                    symbol: "grain".to_string(),
                    name: "Grain".to_string(),
                    category: GoodCategory::Food,
                    base_price: 1.0,
                    volatility: 1.0,
                    min_price: None,
                    max_price: None,
                    market_supply: 0.0,
                }],
            })
            .unwrap(),
            1,
            &tuning(),
        );
        let mut stats_r = StatsLedger::default();

        restored
            .apply(&mut clock_r, &mut depot_r, &mut market_r, &mut stats_r)
            .unwrap();

        assert_eq!(clock_r.day_count(), clock.day_count());
        assert!((clock_r.elapsed_days() - clock.elapsed_days()).abs() < 1e-12);
        assert!((clock_r.time_scale() - clock.time_scale()).abs() < f32::EPSILON);

        assert!((depot_r.cash() - depot.cash()).abs() < f32::EPSILON);
        assert_eq!(depot_r.capacity(), depot.capacity());
        assert_eq!(depot_r.quantity_of(&grain), depot.quantity_of(&grain));
        assert_eq!(depot_r.used_storage(), depot.used_storage());

        let original = market.entry(&grain).unwrap();
        let round_tripped = market_r.entry(&grain).unwrap();
        assert!((round_tripped.price - original.price).abs() < f32::EPSILON);
        assert!((round_tripped.supply - original.supply).abs() < f32::EPSILON);
        assert!((round_tripped.pressure - original.pressure).abs() < f32::EPSILON);

        assert_eq!(stats_r.samples(), stats.samples());
    }

    #[test]
    fn restored_state_keeps_simulating() {
        let (clock, depot, market, stats) = session();
        let json = SaveState::capture(&clock, &depot, &market, &stats)
            .to_json()
            .unwrap();
        let restored = SaveState::from_json(&json).unwrap();

        let settings = clock_settings();
        let tuning = tuning();
        let mut clock_r = restored.clock;
        let mut market_r = restored.market;

        // Advancing the restored session crosses the next boundary where
        // the original would, with no historical ticks re-run.
        let next_day = clock_r.day_count() + 1;
        let crossings = clock_r.advance(10.0, &settings).unwrap();
        assert_eq!(crossings.days, vec![next_day]);

        let grain = GoodId::from("grain");
        let entry = market_r.entry(&grain).unwrap();
        let (min_price, max_price) = (entry.min_price, entry.max_price);
        market_r.update(1.0, 120, &tuning);
        let price = market_r.price_of(&grain).unwrap();
        assert!(price >= min_price && price <= max_price);
    }

    #[test]
    fn undecodable_snapshots_are_rejected() {
        let error = SaveState::from_json("not a snapshot").unwrap_err();
        assert!(matches!(error, SnapshotError::Decode { .. }));
        assert!(error.to_string().contains("decode"));
    }

    #[test]
    fn snapshots_violating_invariants_are_rejected() {
        let (clock, depot, market, stats) = session();
        let json = SaveState::capture(&clock, &depot, &market, &stats)
            .to_json()
            .unwrap();

        // Shrink the capacity below the stored quantity.
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["depot"]["capacity"] = serde_json::json!(1);
        let error = SaveState::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(error, SnapshotError::Invariant { .. }));

        // Push a price outside its bounds.
        let mut value: serde_json::Value = serde_json::from_str(&json).unwrap();
        value["market"]["entries"]["grain"]["price"] = serde_json::json!(9999.0);
        let error = SaveState::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(error, SnapshotError::Invariant { .. }));
    }
}
