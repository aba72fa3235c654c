//! Market tuning parameters loaded from config.
use std::{fs, path::Path};

use bevy::prelude::*;
use serde::Deserialize;

use crate::goods::GoodCategory;

const CONFIG_PATH: &str = "config/market.toml";

#[derive(Debug, Clone, Deserialize, Default)]
struct RawMarketConfig {
    #[serde(default)]
    market: RawMarketSection,
    #[serde(default)]
    population: RawPopulationSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawMarketSection {
    fee_percent: f32,
    imbalance_gain: f32,
    pressure_half_life_days: f32,
    pressure_ema_horizon_days: f32,
    demand_drift_days: f32,
    base_demand_gain: f32,
    base_demand_relax_days: f32,
    min_base_demand_factor: f32,
    max_base_demand_factor: f32,
}

impl Default for RawMarketSection {
    fn default() -> Self {
        Self {
            fee_percent: 0.05,
            imbalance_gain: 0.5,
            pressure_half_life_days: 2.0,
            pressure_ema_horizon_days: 5.0,
            demand_drift_days: 3.0,
            base_demand_gain: 0.05,
            base_demand_relax_days: 30.0,
            min_base_demand_factor: 0.25,
            max_base_demand_factor: 4.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawPopulationSection {
    default_population: u32,
    food_per_capita: f32,
    raw_material_per_capita: f32,
    craft_per_capita: f32,
    luxury_per_capita: f32,
}

impl Default for RawPopulationSection {
    fn default() -> Self {
        Self {
            default_population: 1000,
            food_per_capita: 4.0,
            raw_material_per_capita: 2.5,
            craft_per_capita: 2.0,
            luxury_per_capita: 0.6,
        }
    }
}

/// Tunable constants governing price formation and demand drift.
#[derive(Resource, Debug, Clone)]
pub struct MarketTuning {
    /// Transaction cost as a fraction of the gross trade value.
    pub fee_percent: f32,
    pub imbalance_gain: f32,
    pub pressure_half_life_days: f32,
    pub pressure_ema_horizon_days: f32,
    pub demand_drift_days: f32,
    pub base_demand_gain: f32,
    pub base_demand_relax_days: f32,
    pub min_base_demand_factor: f32,
    pub max_base_demand_factor: f32,
    pub default_population: u32,
    pub food_per_capita: f32,
    pub raw_material_per_capita: f32,
    pub craft_per_capita: f32,
    pub luxury_per_capita: f32,
}

impl MarketTuning {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawMarketConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawMarketConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawMarketConfig::default().into()
            }
        }
    }

    /// Units of demand one inhabitant generates for goods of a category.
    pub fn demand_per_capita(&self, category: GoodCategory) -> f32 {
        match category {
            GoodCategory::Food => self.food_per_capita,
            GoodCategory::RawMaterial => self.raw_material_per_capita,
            GoodCategory::Craft => self.craft_per_capita,
            GoodCategory::Luxury => self.luxury_per_capita,
        }
    }
}

impl Default for MarketTuning {
    fn default() -> Self {
        RawMarketConfig::default().into()
    }
}

impl From<RawMarketConfig> for MarketTuning {
    fn from(value: RawMarketConfig) -> Self {
        let market = value.market;
        let population = value.population;
        Self {
            fee_percent: market.fee_percent.clamp(0.0, 0.95),
            imbalance_gain: market.imbalance_gain.max(0.0),
            pressure_half_life_days: market.pressure_half_life_days.max(0.01),
            pressure_ema_horizon_days: market.pressure_ema_horizon_days.max(0.01),
            demand_drift_days: market.demand_drift_days.max(0.01),
            base_demand_gain: market.base_demand_gain.max(0.0),
            base_demand_relax_days: market.base_demand_relax_days.max(0.01),
            min_base_demand_factor: market.min_base_demand_factor.clamp(0.0, 1.0),
            max_base_demand_factor: market.max_base_demand_factor.max(1.0),
            default_population: population.default_population,
            food_per_capita: population.food_per_capita.max(0.0),
            raw_material_per_capita: population.raw_material_per_capita.max(0.0),
            craft_per_capita: population.craft_per_capita.max(0.0),
            luxury_per_capita: population.luxury_per_capita.max(0.0),
        }
    }
}
