//! Depot resource and its configuration.
use std::collections::BTreeMap;
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::goods::GoodId;

use super::errors::DepotError;

const CONFIG_PATH: &str = "config/depot.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawDepotConfig {
    #[serde(default)]
    depot: RawDepotSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawDepotSection {
    starting_money: f32,
    storage_capacity: u32,
    daily_cost_of_living: f32,
}

impl Default for RawDepotSection {
    fn default() -> Self {
        Self {
            starting_money: 100.0,
            storage_capacity: 100,
            daily_cost_of_living: 2.0,
        }
    }
}

/// Starting balance and upkeep parameters for a new session.
#[derive(Resource, Debug, Clone)]
pub struct DepotSettings {
    pub starting_money: f32,
    pub storage_capacity: u32,
    pub daily_cost_of_living: f32,
}

impl DepotSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawDepotConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawDepotConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawDepotConfig::default().into()
            }
        }
    }
}

impl From<RawDepotConfig> for DepotSettings {
    fn from(value: RawDepotConfig) -> Self {
        let depot = value.depot;
        Self {
            starting_money: depot.starting_money.max(0.0),
            storage_capacity: depot.storage_capacity,
            daily_cost_of_living: depot.daily_cost_of_living.max(0.0),
        }
    }
}

/// The player's depot: cash balance, storage capacity, and held goods.
///
/// Every mutating operation is atomic with respect to its own invariant:
/// it either applies fully or rejects without touching any state.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Depot {
    cash: f32,
    capacity: u32,
    holdings: BTreeMap<GoodId, u32>,
}

impl Depot {
    pub fn new(cash: f32, capacity: u32) -> Self {
        Self {
            cash: cash.max(0.0),
            capacity,
            holdings: BTreeMap::new(),
        }
    }

    pub fn from_settings(settings: &DepotSettings) -> Self {
        Self::new(settings.starting_money, settings.storage_capacity)
    }

    pub fn cash(&self) -> f32 {
        self.cash
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Total units currently stored, derived from the holdings map.
    pub fn used_storage(&self) -> u32 {
        self.holdings.values().sum()
    }

    pub fn free_storage(&self) -> u32 {
        self.capacity.saturating_sub(self.used_storage())
    }

    pub fn quantity_of(&self, good: &GoodId) -> u32 {
        self.holdings.get(good).copied().unwrap_or(0)
    }

    pub fn holdings(&self) -> impl Iterator<Item = (&GoodId, u32)> {
        self.holdings.iter().map(|(good, quantity)| (good, *quantity))
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.cash >= cost
    }

    pub fn can_store(&self, quantity: u32) -> bool {
        self.used_storage().saturating_add(quantity) <= self.capacity
    }

    /// Adds goods to storage, rejecting the whole deposit if it would
    /// exceed capacity.
    pub fn deposit(&mut self, good: GoodId, quantity: u32) -> Result<(), DepotError> {
        if quantity == 0 {
            return Ok(());
        }
        if !self.can_store(quantity) {
            return Err(DepotError::InsufficientStorage {
                requested: quantity,
                free: self.free_storage(),
            });
        }

        *self.holdings.entry(good).or_insert(0) += quantity;
        debug_assert!(self.used_storage() <= self.capacity);
        Ok(())
    }

    /// Removes goods from storage, rejecting the whole withdrawal if more
    /// is requested than held.
    pub fn withdraw(&mut self, good: &GoodId, quantity: u32) -> Result<(), DepotError> {
        if quantity == 0 {
            return Ok(());
        }
        let held = self.quantity_of(good);
        if held < quantity {
            return Err(DepotError::InsufficientStock {
                good: good.clone(),
                requested: quantity,
                held,
            });
        }

        let remaining = held - quantity;
        if remaining == 0 {
            self.holdings.remove(good);
        } else {
            self.holdings.insert(good.clone(), remaining);
        }
        Ok(())
    }

    pub fn credit(&mut self, amount: f32) {
        debug_assert!(amount.is_finite() && amount >= 0.0);
        self.cash += amount;
    }

    /// Deducts cash, rejecting any debit that would push the balance
    /// negative.
    pub fn debit(&mut self, amount: f32) -> Result<(), DepotError> {
        debug_assert!(amount.is_finite() && amount >= 0.0);
        if !self.can_afford(amount) {
            return Err(DepotError::InsufficientFunds {
                required: amount,
                available: self.cash,
            });
        }
        self.cash -= amount;
        Ok(())
    }

    /// Books daily upkeep, saturating at zero instead of overdrawing.
    /// Returns the amount actually deducted.
    pub fn deduct_cost_of_living(&mut self, amount: f32) -> f32 {
        debug_assert!(amount.is_finite() && amount >= 0.0);
        let deducted = amount.min(self.cash);
        self.cash -= deducted;
        deducted
    }
}
