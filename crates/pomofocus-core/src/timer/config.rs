use serde::{Deserialize, Serialize};

pub const DEFAULT_WORK_MIN: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
pub const DEFAULT_LONG_BREAK_MIN: u32 = 15;
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Work => "Focus Time",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }
}

/// Phase durations in seconds plus the long-break cadence.
///
/// All fields are strictly positive. Construction through [`from_minutes`]
/// sanitizes zero values back to the documented defaults instead of failing,
/// so a zero duration cannot reach the engine.
///
/// [`from_minutes`]: TimerConfig::from_minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub work_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
    /// Completed work sessions between long breaks.
    pub long_break_interval: u32,
}

impl TimerConfig {
    /// Build a config from minute-denominated settings input.
    pub fn from_minutes(work: u32, short_break: u32, long_break: u32, interval: u32) -> Self {
        Self {
            work_secs: or_default(work, DEFAULT_WORK_MIN) * 60,
            short_break_secs: or_default(short_break, DEFAULT_SHORT_BREAK_MIN) * 60,
            long_break_secs: or_default(long_break, DEFAULT_LONG_BREAK_MIN) * 60,
            long_break_interval: or_default(interval, DEFAULT_LONG_BREAK_INTERVAL),
        }
    }

    /// Configured duration of `phase` in seconds.
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Work => self.work_secs,
            Phase::ShortBreak => self.short_break_secs,
            Phase::LongBreak => self.long_break_secs,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self::from_minutes(
            DEFAULT_WORK_MIN,
            DEFAULT_SHORT_BREAK_MIN,
            DEFAULT_LONG_BREAK_MIN,
            DEFAULT_LONG_BREAK_INTERVAL,
        )
    }
}

fn or_default(value: u32, default: u32) -> u32 {
    if value == 0 {
        default
    } else {
        value
    }
}
