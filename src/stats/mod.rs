//! Stats module keeping the append-only ledger of daily wealth samples.
pub mod events;
pub mod ledger;
pub mod plugin;
pub mod systems;

pub use events::StatSampleRecordedEvent;
pub use ledger::{StatSample, StatsLedger};
pub use plugin::StatsPlugin;
