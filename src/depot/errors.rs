//! Error types surfaced by depot operations.
use std::fmt;

use crate::goods::GoodId;

/// Rejections raised by depot mutations. Every rejection leaves the depot
/// unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum DepotError {
    InsufficientFunds { required: f32, available: f32 },
    InsufficientStock { good: GoodId, requested: u32, held: u32 },
    InsufficientStorage { requested: u32, free: u32 },
}

impl fmt::Display for DepotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFunds {
                required,
                available,
            } => write!(
                f,
                "Not enough money: need {required:.2}, have {available:.2}"
            ),
            Self::InsufficientStock {
                good,
                requested,
                held,
            } => write!(f, "Not enough {good} in stock: need {requested}, have {held}"),
            Self::InsufficientStorage { requested, free } => write!(
                f,
                "Not enough storage: need {requested} slots, have {free} free"
            ),
        }
    }
}

impl std::error::Error for DepotError {}
