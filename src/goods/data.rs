//! Good catalog loading and the process-wide registry.
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use bevy::{log::warn, prelude::Resource};
use serde::Deserialize;

use super::components::{GoodCategory, GoodId};

const GOODS_CONFIG_PATH: &str = "config/goods.toml";

// Deterministic bound factors applied when a catalog entry omits explicit
// price bounds.
const DEFAULT_MIN_PRICE_FACTOR: f32 = 0.25;
const DEFAULT_MAX_PRICE_FACTOR: f32 = 3.0;

#[derive(Debug, Clone, Deserialize)]
pub struct GoodsConfig {
    pub goods: Vec<GoodConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoodConfig {
    pub symbol: String,
    pub name: String,
    pub category: GoodCategory,
    pub base_price: f32,
    #[serde(default = "default_volatility")]
    pub volatility: f32,
    #[serde(default)]
    pub min_price: Option<f32>,
    #[serde(default)]
    pub max_price: Option<f32>,
    #[serde(default = "default_market_supply")]
    pub market_supply: f32,
}

fn default_volatility() -> f32 {
    1.0
}

fn default_market_supply() -> f32 {
    1000.0
}

/// Immutable definition of one tradable good.
#[derive(Debug, Clone)]
pub struct GoodDefinition {
    pub id: GoodId,
    pub name: String,
    pub category: GoodCategory,
    pub base_price: f32,
    pub volatility: f32,
    pub min_price: f32,
    pub max_price: f32,
    pub initial_supply: f32,
}

/// Static catalog of tradable goods, loaded once at startup.
#[derive(Resource, Debug, Clone)]
pub struct GoodRegistry {
    goods: BTreeMap<GoodId, GoodDefinition>,
}

impl GoodRegistry {
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data =
            fs::read_to_string(&path).map_err(|err| format!("unable to read file: {err}"))?;
        let config: GoodsConfig =
            toml::from_str(&data).map_err(|err| format!("invalid goods config: {err}"))?;
        Self::from_config(config)
    }

    pub fn from_config(config: GoodsConfig) -> Result<Self, String> {
        if config.goods.is_empty() {
            return Err("goods config must define at least one good".to_string());
        }

        let mut goods = BTreeMap::new();

        for entry in config.goods {
            let id = GoodId::new(&entry.symbol);
            if id.is_empty() {
                return Err("good symbol cannot be empty".to_string());
            }
            if goods.contains_key(&id) {
                return Err(format!("duplicate good symbol '{id}'"));
            }
            if !(entry.base_price > 0.0) {
                return Err(format!("good '{id}' must have a positive base price"));
            }
            if !(entry.volatility > 0.0) {
                return Err(format!("good '{id}' must have a positive volatility"));
            }
            if entry.market_supply < 0.0 {
                return Err(format!("good '{id}' cannot start with negative supply"));
            }

            let min_price = entry
                .min_price
                .unwrap_or(entry.base_price * DEFAULT_MIN_PRICE_FACTOR);
            let max_price = entry
                .max_price
                .unwrap_or(entry.base_price * DEFAULT_MAX_PRICE_FACTOR);
            if !(min_price > 0.0) || min_price > entry.base_price || max_price < entry.base_price {
                return Err(format!(
                    "good '{id}' price bounds must satisfy 0 < min <= base <= max"
                ));
            }

            let definition = GoodDefinition {
                id: id.clone(),
                name: entry.name,
                category: entry.category,
                base_price: entry.base_price,
                volatility: entry.volatility,
                min_price,
                max_price,
                initial_supply: entry.market_supply,
            };
            goods.insert(id, definition);
        }

        Ok(Self { goods })
    }

    /// The twelve-good catalog the game shipped with before external config
    /// existed.
    pub fn fallback() -> Self {
        let catalog = [
            ("wood", "Wood", GoodCategory::RawMaterial, 1.0, 1.0, 5000.0),
            ("stone", "Stone", GoodCategory::RawMaterial, 2.0, 0.8, 2000.0),
            ("iron", "Iron", GoodCategory::RawMaterial, 5.0, 1.2, 900.0),
            ("wool", "Wool", GoodCategory::Craft, 3.0, 1.0, 2500.0),
            ("hide", "Hide", GoodCategory::Craft, 4.0, 1.0, 1000.0),
            ("fish", "Fish", GoodCategory::Food, 2.0, 1.5, 5000.0),
            ("wheat", "Wheat", GoodCategory::Food, 1.0, 1.3, 5000.0),
            ("wine", "Wine", GoodCategory::Luxury, 10.0, 1.4, 500.0),
            ("beer", "Beer", GoodCategory::Luxury, 5.0, 1.1, 500.0),
            ("meat", "Meat", GoodCategory::Food, 5.0, 1.2, 800.0),
            ("pottery", "Pottery", GoodCategory::Craft, 3.0, 0.9, 3500.0),
            ("linen", "Linen", GoodCategory::Craft, 3.0, 0.9, 2000.0),
        ];

        let config = GoodsConfig {
            goods: catalog
                .into_iter()
                .map(
                    |(symbol, name, category, base_price, volatility, supply)| GoodConfig {
                        symbol: symbol.to_string(),
                        name: name.to_string(),
                        category,
                        base_price,
                        volatility,
                        min_price: None,
                        max_price: None,
                        market_supply: supply,
                    },
                )
                .collect(),
        };

        Self::from_config(config).expect("fallback goods catalog should be valid")
    }

    pub fn get(&self, id: &GoodId) -> Option<&GoodDefinition> {
        self.goods.get(id)
    }

    pub fn contains(&self, id: &GoodId) -> bool {
        self.goods.contains_key(id)
    }

    pub fn goods(&self) -> impl Iterator<Item = &GoodDefinition> {
        self.goods.values()
    }

    pub fn len(&self) -> usize {
        self.goods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goods.is_empty()
    }
}

impl Default for GoodRegistry {
    fn default() -> Self {
        match Self::load_from_file(GOODS_CONFIG_PATH) {
            Ok(registry) => registry,
            Err(error) => {
                warn!(
                    "Failed to load goods config from {}: {error}. Falling back to defaults.",
                    GOODS_CONFIG_PATH
                );
                Self::fallback()
            }
        }
    }
}
