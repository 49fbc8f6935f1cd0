//! # pomofocus core library
//!
//! Core logic for the pomofocus productivity timer: a second-resolution
//! Pomodoro state machine, a pure focus-score engine over the daily
//! completion history, task tracking, and snapshot persistence. The CLI
//! binary is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Timer engine**: a caller-driven state machine - the shell invokes
//!   `tick()` once per second while the timer runs
//! - **Focus score**: pure derivation over the completion history; the
//!   caller supplies "today"
//! - **App**: application shell wiring the engines to the injected
//!   snapshot store and notification sink
//! - **Storage**: SQLite key-value snapshots plus a TOML settings file
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: timer state machine
//! - [`compute_metrics`]: streak, score and 7-day trend
//! - [`App`]: event routing and persistence
//! - [`Database`] / [`Settings`]: on-disk state

pub mod app;
pub mod error;
pub mod events;
pub mod history;
pub mod notify;
pub mod score;
pub mod storage;
pub mod task;
pub mod timer;

pub use app::App;
pub use error::{CoreError, NotifyError, SettingsError, StorageError};
pub use events::Event;
pub use history::{FocusHistory, HistoryEntry};
pub use notify::{NoopSink, NotificationSink};
pub use score::{compute_metrics, DayCount, FocusMetrics, ScoreTier};
pub use storage::{data_dir, Database, Settings, SnapshotStore};
pub use task::{Task, TaskList};
pub use timer::{Phase, TimerConfig, TimerEngine};
