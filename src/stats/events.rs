//! Ledger change notifications for chart UIs.
use bevy::prelude::{Event, Message};

/// Fired after each daily sample lands in the ledger.
#[derive(Event, Message, Debug, Clone, Copy)]
pub struct StatSampleRecordedEvent {
    pub day: u64,
    pub wealth: f32,
}
