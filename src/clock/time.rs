//! Clock configuration, the simulation clock resource, and boundary math.
use std::{fmt, fs, path::Path};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const CONFIG_PATH: &str = "config/clock.toml";

pub const DAYS_PER_WEEK: u64 = 7;
pub const DAYS_PER_MONTH: u64 = 30;

#[derive(Debug, Clone, Deserialize, Default)]
struct RawClockConfig {
    #[serde(default)]
    clock: RawClockSection,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct RawClockSection {
    day_length_minutes: f32,
    default_time_scale: f32,
    min_time_scale: f32,
    max_time_scale: f32,
    speed_step: f32,
}

impl Default for RawClockSection {
    fn default() -> Self {
        Self {
            day_length_minutes: 10.0,
            default_time_scale: 1.0,
            min_time_scale: 0.001,
            max_time_scale: 125.0,
            speed_step: 5.0,
        }
    }
}

/// Tunable parameters describing how real time maps onto in-game time.
#[derive(Resource, Debug, Clone)]
pub struct ClockSettings {
    pub seconds_per_day: f32,
    pub default_time_scale: f32,
    pub min_time_scale: f32,
    pub max_time_scale: f32,
    pub speed_step: f32,
}

impl ClockSettings {
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_PATH);
        match fs::read_to_string(path) {
            Ok(data) => match toml::from_str::<RawClockConfig>(&data) {
                Ok(raw) => raw.into(),
                Err(err) => {
                    warn!(
                        "Failed to parse {} ({}). Falling back to defaults.",
                        CONFIG_PATH, err
                    );
                    RawClockConfig::default().into()
                }
            },
            Err(err) => {
                warn!(
                    "Failed to read {} ({}). Falling back to defaults.",
                    CONFIG_PATH, err
                );
                RawClockConfig::default().into()
            }
        }
    }
}

impl From<RawClockConfig> for ClockSettings {
    fn from(value: RawClockConfig) -> Self {
        let clock = value.clock;
        let seconds_per_day = (clock.day_length_minutes.max(0.1)) * 60.0;
        let min_scale = clock.min_time_scale.max(f32::EPSILON);
        let max_scale = clock.max_time_scale.max(min_scale);

        Self {
            seconds_per_day,
            default_time_scale: clock.default_time_scale.clamp(min_scale, max_scale),
            min_time_scale: min_scale,
            max_time_scale: max_scale,
            speed_step: clock.speed_step.max(1.0),
        }
    }
}

/// Error raised when the clock is advanced with an invalid delta.
#[derive(Debug, Clone, PartialEq)]
pub enum ClockError {
    InvalidTimeDelta { seconds: f32 },
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTimeDelta { seconds } => {
                write!(f, "invalid time delta: {seconds:.4}s (must be >= 0)")
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Calendar boundaries crossed by a single `advance` call, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryCrossings {
    pub days: Vec<u64>,
    pub weeks: Vec<u64>,
    pub months: Vec<u64>,
}

impl BoundaryCrossings {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Authoritative in-game clock.
///
/// Consumes elapsed real time only — never a frame or tick count — so the
/// simulation speed is independent of frame rate.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct SimClock {
    time_scale: f32,
    paused: bool,
    elapsed_days: f64,
    last_delta_days: f64,
}

impl SimClock {
    pub fn new(settings: &ClockSettings) -> Self {
        Self {
            time_scale: settings.default_time_scale,
            paused: false,
            elapsed_days: 0.0,
            last_delta_days: 0.0,
        }
    }

    /// Current in-game day index (day 0 is the first day of the session).
    pub fn day_count(&self) -> u64 {
        self.elapsed_days.floor() as u64
    }

    /// Fraction of the current day already elapsed, in [0, 1).
    pub fn day_fraction(&self) -> f64 {
        self.elapsed_days - self.elapsed_days.floor()
    }

    /// Total in-game days elapsed since the session started.
    pub fn elapsed_days(&self) -> f64 {
        self.elapsed_days
    }

    /// In-game days added by the most recent successful `advance`.
    pub fn last_delta_days(&self) -> f64 {
        self.last_delta_days
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pauses the simulation without discarding accumulated time.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn set_time_scale(&mut self, scale: f32, settings: &ClockSettings) {
        self.time_scale = scale.clamp(settings.min_time_scale, settings.max_time_scale);
    }

    /// Steps one level up the speed ladder.
    pub fn faster(&mut self, settings: &ClockSettings) {
        self.set_time_scale(self.time_scale * settings.speed_step, settings);
    }

    /// Steps one level down the speed ladder.
    pub fn slower(&mut self, settings: &ClockSettings) {
        self.set_time_scale(self.time_scale / settings.speed_step, settings);
    }

    /// Advances the clock by an elapsed real-time delta.
    ///
    /// Every day/week/month boundary inside the delta is reported exactly
    /// once, in chronological order, even when one delta spans several
    /// boundaries. While paused the clock accepts the call but accumulates
    /// nothing.
    pub fn advance(
        &mut self,
        real_delta_seconds: f32,
        settings: &ClockSettings,
    ) -> Result<BoundaryCrossings, ClockError> {
        if real_delta_seconds < 0.0 || !real_delta_seconds.is_finite() {
            return Err(ClockError::InvalidTimeDelta {
                seconds: real_delta_seconds,
            });
        }

        if self.paused {
            self.last_delta_days = 0.0;
            return Ok(BoundaryCrossings::default());
        }

        let scaled_days = f64::from(real_delta_seconds) * f64::from(self.time_scale)
            / f64::from(settings.seconds_per_day);

        let previous_day = self.day_count();
        self.elapsed_days += scaled_days;
        self.last_delta_days = scaled_days;
        let current_day = self.day_count();

        let mut crossings = BoundaryCrossings::default();
        for day in (previous_day + 1)..=current_day {
            crossings.days.push(day);
            if day % DAYS_PER_WEEK == 0 {
                crossings.weeks.push(day / DAYS_PER_WEEK);
            }
            if day % DAYS_PER_MONTH == 0 {
                crossings.months.push(day / DAYS_PER_MONTH);
            }
        }

        Ok(crossings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> ClockSettings {
        ClockSettings {
            seconds_per_day: 10.0,
            default_time_scale: 1.0,
            min_time_scale: 0.001,
            max_time_scale: 125.0,
            speed_step: 5.0,
        }
    }

    #[test]
    fn boundary_count_is_chunking_invariant() {
        let settings = settings();

        let mut whole = SimClock::new(&settings);
        let crossings = whole.advance(30.0, &settings).unwrap();
        assert_eq!(crossings.days, vec![1, 2, 3]);

        let mut chunked = SimClock::new(&settings);
        let mut days = Vec::new();
        for _ in 0..3 {
            days.extend(chunked.advance(10.0, &settings).unwrap().days);
        }
        assert_eq!(days, vec![1, 2, 3]);
        assert_eq!(whole.day_count(), chunked.day_count());
    }

    #[test]
    fn multi_day_delta_never_skips_boundaries() {
        let settings = settings();
        let mut clock = SimClock::new(&settings);

        // 100 seconds = 10 in-game days, crossing one week boundary.
        let crossings = clock.advance(100.0, &settings).unwrap();
        assert_eq!(crossings.days.len(), 10);
        assert_eq!(crossings.days.first(), Some(&1));
        assert_eq!(crossings.days.last(), Some(&10));
        assert_eq!(crossings.weeks, vec![1]);
        assert!(crossings.months.is_empty());

        // 200 more seconds crosses day 30 (month 1) and weeks 2, 3, 4.
        let crossings = clock.advance(200.0, &settings).unwrap();
        assert_eq!(crossings.days.len(), 20);
        assert_eq!(crossings.weeks, vec![2, 3, 4]);
        assert_eq!(crossings.months, vec![1]);
    }

    #[test]
    fn negative_delta_is_rejected_without_state_change() {
        let settings = settings();
        let mut clock = SimClock::new(&settings);
        clock.advance(5.0, &settings).unwrap();
        let elapsed = clock.elapsed_days();

        let error = clock.advance(-1.0, &settings).unwrap_err();
        assert!(matches!(error, ClockError::InvalidTimeDelta { .. }));
        assert!(error.to_string().contains("invalid time delta"));
        assert_eq!(clock.elapsed_days(), elapsed);
    }

    #[test]
    fn pause_preserves_accumulated_time() {
        let settings = settings();
        let mut clock = SimClock::new(&settings);
        clock.advance(5.0, &settings).unwrap();
        assert!((clock.day_fraction() - 0.5).abs() < 1e-9);

        clock.pause();
        assert!(clock.is_paused());
        let crossings = clock.advance(100.0, &settings).unwrap();
        assert!(crossings.is_empty());
        assert!((clock.day_fraction() - 0.5).abs() < 1e-9);

        clock.resume();
        let crossings = clock.advance(5.0, &settings).unwrap();
        assert_eq!(crossings.days, vec![1]);
    }

    #[test]
    fn speed_ladder_clamps_to_settings() {
        let settings = settings();
        let mut clock = SimClock::new(&settings);

        clock.faster(&settings);
        assert!((clock.time_scale() - 5.0).abs() < f32::EPSILON);
        clock.faster(&settings);
        clock.faster(&settings);
        assert!((clock.time_scale() - settings.max_time_scale).abs() < f32::EPSILON);

        for _ in 0..10 {
            clock.slower(&settings);
        }
        assert!((clock.time_scale() - settings.min_time_scale).abs() < f32::EPSILON);
    }

    #[test]
    fn scaled_advance_converts_real_seconds() {
        let settings = settings();
        let mut clock = SimClock::new(&settings);
        clock.set_time_scale(2.0, &settings);

        clock.advance(10.0, &settings).unwrap();
        assert_eq!(clock.day_count(), 2);
        assert!((clock.last_delta_days() - 2.0).abs() < 1e-9);
    }
}
