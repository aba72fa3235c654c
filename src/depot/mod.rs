//! Depot module owning the player's inventory, storage, and cash balance.
pub mod errors;
pub mod plugin;
pub mod resources;
pub mod systems;

pub use errors::DepotError;
pub use plugin::DepotPlugin;
pub use resources::{Depot, DepotSettings};
