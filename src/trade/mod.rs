//! Trade module hosting the order queue and the transaction engine.
pub mod engine;
pub mod errors;
pub mod events;
pub mod orders;
pub mod plugin;
pub mod systems;

pub use engine::{execute, TradeReceipt};
pub use errors::TradeRejection;
pub use events::{TradeExecutedEvent, TradeRejectedEvent};
pub use orders::{Order, OrderId, OrderQueue};
pub use plugin::TradePlugin;
