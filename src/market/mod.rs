//! Market module owning per-good supply/demand state and price formation.
pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;
pub mod tuning;

pub use events::PriceChangedEvent;
pub use plugin::MarketPlugin;
pub use resources::{CityPopulation, Market, MarketEntry, MarketError, Quote, TradeDirection};
pub use systems::update_market;
pub use tuning::MarketTuning;
