//! Calendar boundary messages emitted by the simulation clock.
use bevy::prelude::{Event, Message};

/// Fired once for every in-game day boundary crossed.
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBoundaryEvent {
    pub day: u64,
}

/// Fired once for every in-game week boundary crossed.
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekBoundaryEvent {
    pub week: u64,
    pub day: u64,
}

/// Fired once for every in-game month boundary crossed.
#[derive(Event, Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBoundaryEvent {
    pub month: u64,
    pub day: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_events_expose_fields() {
        let day = DayBoundaryEvent { day: 14 };
        let week = WeekBoundaryEvent { week: 2, day: 14 };
        let month = MonthBoundaryEvent { month: 1, day: 30 };

        assert_eq!(day.day, 14);
        assert_eq!(week.week, 2);
        assert_eq!(month.day, 30);
    }
}
