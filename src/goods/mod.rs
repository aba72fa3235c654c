//! Goods module hosting the static commodity catalog and its registry.
pub mod components;
pub mod data;
pub mod plugin;

pub use components::{GoodCategory, GoodId};
pub use data::{GoodDefinition, GoodRegistry};
pub use plugin::GoodsPlugin;
