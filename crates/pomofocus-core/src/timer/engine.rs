//! Timer engine implementation.
//!
//! The timer engine is a second-resolution state machine. It does not use
//! internal threads or read the wall clock - the caller is responsible for
//! calling `tick()` once per elapsed second while the timer is running.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> ShortBreak -> Work -> ... -> LongBreak -> Work
//! ```
//!
//! Every completed work session advances the long-break cadence; every break
//! returns to Work. The engine never auto-starts the next phase.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(config);
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event) when the phase completes
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::{Phase, TimerConfig};
use crate::events::Event;

/// Core timer engine.
///
/// Operates on caller-driven ticks -- no internal thread, no clock reads.
/// Serialized as a snapshot by the shell; the session counter is excluded
/// so it restarts with the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    config: TimerConfig,
    phase: Phase,
    remaining_secs: u32,
    /// Configured duration of the current phase, snapshotted at entry.
    total_secs: u32,
    running: bool,
    #[serde(skip)]
    completed_sessions: u32,
    /// Back-reference to the task credited on work completion.
    /// Accepted verbatim, never validated against the task list.
    #[serde(default)]
    current_task_id: Option<String>,
}

impl TimerEngine {
    /// Create a new engine in the Work phase, paused, with the full
    /// configured work duration on the clock.
    pub fn new(config: TimerConfig) -> Self {
        let total_secs = config.duration_secs(Phase::Work);
        Self {
            config,
            phase: Phase::Work,
            remaining_secs: total_secs,
            total_secs,
            running: false,
            completed_sessions: 0,
            current_task_id: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn completed_sessions(&self) -> u32 {
        self.completed_sessions
    }

    pub fn current_task_id(&self) -> Option<&str> {
        self.current_task_id.as_deref()
    }

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    /// Remaining share of the current phase, 0.0 .. 100.0.
    pub fn progress(&self) -> f64 {
        if self.total_secs == 0 {
            return 0.0;
        }
        (f64::from(self.remaining_secs) / f64::from(self.total_secs) * 100.0).clamp(0.0, 100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs,
            running: self.running,
            completed_sessions: self.completed_sessions,
            current_task_id: self.current_task_id.clone(),
            progress_pct: self.progress(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.running {
            return None; // Already running.
        }
        self.running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.running {
            return None; // Already paused.
        }
        self.running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Pause and restore the current phase to its full configured duration.
    /// The phase itself does not change.
    pub fn reset(&mut self) -> Option<Event> {
        self.running = false;
        self.total_secs = self.config.duration_secs(self.phase);
        self.remaining_secs = self.total_secs;
        Some(Event::TimerReset {
            phase: self.phase,
            at: Utc::now(),
        })
    }

    /// Force an immediate phase transition without completing the countdown.
    ///
    /// Skipping a work phase is explicitly not a completion: the session
    /// counter does not move and no completion event is emitted.
    pub fn skip(&mut self) -> Option<Event> {
        let from = self.phase;
        let to = match self.phase {
            Phase::Work => Phase::ShortBreak,
            Phase::ShortBreak | Phase::LongBreak => Phase::Work,
        };
        self.enter(to);
        Some(Event::TimerSkipped {
            from,
            to,
            at: Utc::now(),
        })
    }

    /// Advance the countdown by one second of elapsed wall time.
    ///
    /// Call exactly once per second while running. Returns the completion
    /// event when the current phase runs down to zero; the next phase is
    /// entered paused, with durations reloaded from the active config.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }
        match self.phase {
            Phase::Work => {
                self.completed_sessions += 1;
                let sessions = self.completed_sessions;
                let task_id = self.current_task_id.clone();
                let next = if sessions % self.config.long_break_interval == 0 {
                    Phase::LongBreak
                } else {
                    Phase::ShortBreak
                };
                self.enter(next);
                Some(Event::WorkSessionCompleted {
                    task_id,
                    sessions,
                    at: Utc::now(),
                })
            }
            Phase::ShortBreak | Phase::LongBreak => {
                let phase = self.phase;
                self.enter(Phase::Work);
                Some(Event::BreakCompleted {
                    phase,
                    at: Utc::now(),
                })
            }
        }
    }

    /// Replace the active configuration.
    ///
    /// The countdown for the current phase reloads to the new full duration
    /// immediately, discarding any partially elapsed time. The running flag
    /// is left untouched.
    pub fn apply_config(&mut self, config: TimerConfig) {
        self.config = config;
        self.total_secs = self.config.duration_secs(self.phase);
        self.remaining_secs = self.total_secs;
    }

    /// Replace the task back-reference used to tag completion events.
    pub fn set_current_task(&mut self, task_id: Option<String>) {
        self.current_task_id = task_id;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn enter(&mut self, phase: Phase) {
        self.phase = phase;
        self.total_secs = self.config.duration_secs(phase);
        self.remaining_secs = self.total_secs;
        self.running = false;
    }
}
