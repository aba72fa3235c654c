//! ClockPlugin wires the simulation clock into the host game loop.
use bevy::prelude::*;

use super::{
    events::{DayBoundaryEvent, MonthBoundaryEvent, WeekBoundaryEvent},
    time::{ClockSettings, SimClock},
};

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        let settings = ClockSettings::load_or_default();
        info!(
            "Clock configured: day length {:.2} minutes, time scale {:.3} (max {:.1})",
            settings.seconds_per_day / 60.0,
            settings.default_time_scale,
            settings.max_time_scale
        );

        app.insert_resource(SimClock::new(&settings))
            .insert_resource(settings)
            .add_event::<DayBoundaryEvent>()
            .add_event::<WeekBoundaryEvent>()
            .add_event::<MonthBoundaryEvent>()
            .add_systems(Update, advance_sim_clock);
    }
}

/// Advances the simulation clock with the frame's real delta and publishes
/// every calendar boundary crossed.
pub fn advance_sim_clock(
    mut clock: ResMut<SimClock>,
    settings: Res<ClockSettings>,
    time: Res<Time>,
    mut day_writer: MessageWriter<DayBoundaryEvent>,
    mut week_writer: MessageWriter<WeekBoundaryEvent>,
    mut month_writer: MessageWriter<MonthBoundaryEvent>,
) {
    let crossings = match clock.advance(time.delta().as_secs_f32(), &settings) {
        Ok(crossings) => crossings,
        Err(error) => {
            warn!("Clock advance rejected: {error}");
            return;
        }
    };

    for day in &crossings.days {
        day_writer.write(DayBoundaryEvent { day: *day });
    }
    for week in &crossings.weeks {
        week_writer.write(WeekBoundaryEvent {
            week: *week,
            day: *week * super::time::DAYS_PER_WEEK,
        });
    }
    for month in &crossings.months {
        month_writer.write(MonthBoundaryEvent {
            month: *month,
            day: *month * super::time::DAYS_PER_MONTH,
        });
    }
}
