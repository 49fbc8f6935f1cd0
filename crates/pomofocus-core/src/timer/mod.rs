mod config;
mod engine;

pub use config::{
    Phase, TimerConfig, DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_LONG_BREAK_MIN,
    DEFAULT_SHORT_BREAK_MIN, DEFAULT_WORK_MIN,
};
pub use engine::TimerEngine;
