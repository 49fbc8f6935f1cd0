//! Application shell wiring the engines to storage and notifications.
//!
//! The timer and score engines never touch storage. `App` owns the injected
//! store and sink, routes completion events to the task list and the day's
//! history, and persists a full snapshot of each record after every
//! mutation - no deltas.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::CoreError;
use crate::events::Event;
use crate::history::FocusHistory;
use crate::notify::NotificationSink;
use crate::score::{compute_metrics, FocusMetrics};
use crate::storage::{Settings, SnapshotStore};
use crate::task::{Task, TaskList};
use crate::timer::TimerEngine;

pub const TASKS_KEY: &str = "tasks";
pub const HISTORY_KEY: &str = "focus_history";
pub const ENGINE_KEY: &str = "timer_engine";

pub struct App<S: SnapshotStore> {
    store: S,
    sink: Box<dyn NotificationSink>,
    settings: Settings,
    engine: TimerEngine,
    tasks: TaskList,
    history: FocusHistory,
}

impl<S: SnapshotStore> App<S> {
    /// Load every record from the store. Missing or malformed records fall
    /// back to defaults; loading never fails.
    pub fn load(store: S, sink: Box<dyn NotificationSink>, settings: Settings) -> Self {
        let engine = load_record::<TimerEngine>(&store, ENGINE_KEY)
            .unwrap_or_else(|| TimerEngine::new(settings.timer_config()));
        let tasks = load_record::<TaskList>(&store, TASKS_KEY).unwrap_or_default();
        let history = load_record::<FocusHistory>(&store, HISTORY_KEY).unwrap_or_default();
        Self {
            store,
            sink,
            settings,
            engine,
            tasks,
            history,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn history(&self) -> &FocusHistory {
        &self.history
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> Event {
        self.engine.snapshot()
    }

    /// Derived metrics for `today`, recomputed from the current history.
    pub fn metrics(&self, today: NaiveDate) -> FocusMetrics {
        compute_metrics(&self.history, today)
    }

    // ── Timer commands ───────────────────────────────────────────────

    pub fn start(&mut self) -> Result<Option<Event>, CoreError> {
        let event = self.engine.start();
        self.save_engine()?;
        Ok(event)
    }

    pub fn pause(&mut self) -> Result<Option<Event>, CoreError> {
        let event = self.engine.pause();
        self.save_engine()?;
        Ok(event)
    }

    pub fn reset(&mut self) -> Result<Option<Event>, CoreError> {
        let event = self.engine.reset();
        self.save_engine()?;
        Ok(event)
    }

    pub fn skip(&mut self) -> Result<Option<Event>, CoreError> {
        let event = self.engine.skip();
        self.save_engine()?;
        Ok(event)
    }

    /// Drive the engine by one second. On a phase completion this fires the
    /// notification sink, credits the current task and the day's history for
    /// work sessions, and persists the touched records.
    pub fn tick(&mut self, today: NaiveDate) -> Result<Option<Event>, CoreError> {
        let event = self.engine.tick();
        match &event {
            Some(Event::WorkSessionCompleted { task_id, .. }) => {
                self.notify();
                if let Some(task_id) = task_id {
                    if self.tasks.record_completed(task_id) {
                        self.save_record(TASKS_KEY, &self.tasks)?;
                    }
                }
                self.history.record(today);
                self.save_record(HISTORY_KEY, &self.history)?;
                self.save_engine()?;
            }
            Some(Event::BreakCompleted { .. }) => {
                self.notify();
                self.save_engine()?;
            }
            Some(_) | None => {}
        }
        Ok(event)
    }

    /// Replace the settings record: persist the TOML file and reload the
    /// engine's countdown for the current phase from the new durations.
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), CoreError> {
        settings.save()?;
        self.engine.apply_config(settings.timer_config());
        self.settings = settings;
        self.save_engine()?;
        Ok(())
    }

    pub fn set_current_task(&mut self, task_id: Option<String>) -> Result<(), CoreError> {
        self.engine.set_current_task(task_id);
        self.save_engine()?;
        Ok(())
    }

    // ── Task commands ────────────────────────────────────────────────

    pub fn add_task(&mut self, task: Task) -> Result<(), CoreError> {
        self.tasks.add(task);
        self.save_record(TASKS_KEY, &self.tasks)
    }

    pub fn edit_task(
        &mut self,
        id: &str,
        title: Option<String>,
        estimate: Option<u32>,
    ) -> Result<bool, CoreError> {
        let updated = self.tasks.edit(id, title, estimate);
        if updated {
            self.save_record(TASKS_KEY, &self.tasks)?;
        }
        Ok(updated)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Option<Task>, CoreError> {
        let removed = self.tasks.remove(id);
        if removed.is_some() {
            self.save_record(TASKS_KEY, &self.tasks)?;
            // Deleting the credited task clears the back-reference.
            if self.engine.current_task_id() == Some(id) {
                self.engine.set_current_task(None);
                self.save_engine()?;
            }
        }
        Ok(removed)
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn notify(&self) {
        if let Err(err) = self.sink.session_complete() {
            tracing::warn!(error = %err, "completion notification failed");
        }
    }

    fn save_engine(&self) -> Result<(), CoreError> {
        self.save_record(ENGINE_KEY, &self.engine)
    }

    fn save_record<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }
}

fn load_record<T: DeserializeOwned>(store: &impl SnapshotStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(value) => value?,
        Err(err) => {
            tracing::warn!(key, error = %err, "failed to read record, using defaults");
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "malformed record, using defaults");
            None
        }
    }
}
