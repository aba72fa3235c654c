//! Economy simulation core for Merchant's Rise.
//!
//! Owns the parts of the game with real invariants: the in-game clock,
//! the commodity market, the player depot, the transaction engine, and
//! the statistics ledger. Rendering, input, audio, and chart widgets live
//! in the host game, which drives this core by adding its plugins:
//!
//! ```no_run
//! use bevy::prelude::*;
//! use merchants_rise_economy::{
//!     ClockPlugin, DepotPlugin, GoodsPlugin, MarketPlugin, StatsPlugin, TradePlugin,
//! };
//!
//! App::new()
//!     .add_plugins(MinimalPlugins)
//!     .add_plugins((
//!         GoodsPlugin,
//!         ClockPlugin,
//!         DepotPlugin,
//!         MarketPlugin,
//!         TradePlugin,
//!         StatsPlugin,
//!     ))
//!     .run();
//! ```
//!
//! The UI layer reads prices and depot contents through the resources,
//! submits trades through the [`trade::OrderQueue`], and subscribes to
//! the boundary/price/trade messages instead of polling internal fields.
pub mod clock;
pub mod depot;
pub mod goods;
pub mod market;
pub mod save;
pub mod stats;
pub mod trade;

pub use clock::ClockPlugin;
pub use depot::DepotPlugin;
pub use goods::GoodsPlugin;
pub use market::MarketPlugin;
pub use stats::StatsPlugin;
pub use trade::TradePlugin;
