//! Clock module owning in-game time, calendar boundaries, and speed control.
pub mod events;
pub mod plugin;
pub mod time;

pub use events::{DayBoundaryEvent, MonthBoundaryEvent, WeekBoundaryEvent};
pub use plugin::{advance_sim_clock, ClockPlugin};
pub use time::{BoundaryCrossings, ClockError, ClockSettings, SimClock};
