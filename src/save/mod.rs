//! Save module exposing the session snapshot contract for persistence.
pub mod snapshot;

pub use snapshot::{SaveState, SnapshotError};
