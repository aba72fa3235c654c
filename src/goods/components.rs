//! Good identity and category types shared across the economy core.
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique symbol identifying a tradable good.
///
/// Symbols are normalised to lowercase so config files, save data, and UI
/// input all resolve to the same registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub struct GoodId(String);

impl GoodId {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for GoodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GoodId {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}

/// Broad commodity categories used to derive demand from city population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodCategory {
    Food,
    RawMaterial,
    Craft,
    Luxury,
}

impl GoodCategory {
    pub const ALL: [GoodCategory; 4] = [
        GoodCategory::Food,
        GoodCategory::RawMaterial,
        GoodCategory::Craft,
        GoodCategory::Luxury,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::RawMaterial => "raw material",
            Self::Craft => "craft",
            Self::Luxury => "luxury",
        }
    }
}
