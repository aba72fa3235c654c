//! Rejection reasons returned by the transaction engine.
use std::fmt;

use crate::depot::DepotError;
use crate::goods::GoodId;
use crate::market::MarketError;

/// Why an order was rejected. Every rejection leaves depot and market
/// state untouched, so the caller may simply re-attempt with corrected
/// input.
#[derive(Debug, Clone, PartialEq)]
pub enum TradeRejection {
    NotFound { good: GoodId },
    InvalidQuantity { quantity: u32 },
    InsufficientFunds { required: f32, available: f32 },
    InsufficientStorage { requested: u32, free: u32 },
    InsufficientStock { good: GoodId, requested: u32, held: u32 },
}

impl fmt::Display for TradeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { good } => write!(f, "unknown good '{good}'"),
            Self::InvalidQuantity { quantity } => {
                write!(f, "invalid quantity {quantity} (must be positive)")
            }
            Self::InsufficientFunds {
                required,
                available,
            } => write!(
                f,
                "Not enough money: need {required:.2}, have {available:.2}"
            ),
            Self::InsufficientStorage { requested, free } => write!(
                f,
                "Not enough storage: need {requested} slots, have {free} free"
            ),
            Self::InsufficientStock {
                good,
                requested,
                held,
            } => write!(f, "Not enough {good} in stock: need {requested}, have {held}"),
        }
    }
}

impl std::error::Error for TradeRejection {}

impl From<MarketError> for TradeRejection {
    fn from(error: MarketError) -> Self {
        match error {
            MarketError::UnknownGood { good } => Self::NotFound { good },
        }
    }
}

impl From<DepotError> for TradeRejection {
    fn from(error: DepotError) -> Self {
        match error {
            DepotError::InsufficientFunds {
                required,
                available,
            } => Self::InsufficientFunds {
                required,
                available,
            },
            DepotError::InsufficientStorage { requested, free } => {
                Self::InsufficientStorage { requested, free }
            }
            DepotError::InsufficientStock {
                good,
                requested,
                held,
            } => Self::InsufficientStock {
                good,
                requested,
                held,
            },
        }
    }
}
