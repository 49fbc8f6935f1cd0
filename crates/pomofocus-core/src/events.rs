use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the system produces an Event.
/// One-shot CLI commands print them; the watch loop routes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        at: DateTime<Utc>,
    },
    TimerSkipped {
        from: Phase,
        to: Phase,
        at: DateTime<Utc>,
    },
    /// A work phase ran down to zero. The only path that credits the
    /// current task and the day's history.
    WorkSessionCompleted {
        task_id: Option<String>,
        /// Work sessions completed so far in this process.
        sessions: u32,
        at: DateTime<Utc>,
    },
    /// A break phase ran down to zero.
    BreakCompleted {
        phase: Phase,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u32,
        total_secs: u32,
        running: bool,
        completed_sessions: u32,
        current_task_id: Option<String>,
        progress_pct: f64,
        at: DateTime<Utc>,
    },
}
