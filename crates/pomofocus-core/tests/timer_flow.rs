//! End-to-end timer flow through the application shell.
//!
//! Drives full phases tick by tick over an in-memory store and verifies the
//! completion wiring: notification sink, task credit, history upsert,
//! snapshot persistence.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use pomofocus_core::app::{App, ENGINE_KEY, HISTORY_KEY, TASKS_KEY};
use pomofocus_core::{
    Event, NotificationSink, NotifyError, Phase, Settings, SnapshotStore, Task,
};

#[derive(Clone, Default)]
struct MemStore {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl SnapshotStore for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>, pomofocus_core::StorageError> {
        Ok(self.records.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), pomofocus_core::StorageError> {
        self.records
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct CountingSink {
    fired: Arc<AtomicUsize>,
}

impl NotificationSink for CountingSink {
    fn session_complete(&self) -> Result<(), NotifyError> {
        self.fired.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Sink that always fails; completion handling must shrug it off.
struct BrokenSink;

impl NotificationSink for BrokenSink {
    fn session_complete(&self) -> Result<(), NotifyError> {
        Err(NotifyError("no audio device".into()))
    }
}

fn today() -> NaiveDate {
    "2026-08-06".parse().unwrap()
}

fn minute_settings() -> Settings {
    // 1-minute phases keep full-phase loops at 60 ticks.
    let mut settings = Settings::default();
    settings.set("work", "1").unwrap();
    settings.set("break", "1").unwrap();
    settings.set("long-break", "1").unwrap();
    settings.set("interval", "2").unwrap();
    settings
}

fn run_full_phase(app: &mut App<MemStore>) -> Option<Event> {
    app.start().unwrap();
    let total = app.engine().total_secs();
    let mut last = None;
    for _ in 0..total {
        last = app.tick(today()).unwrap();
    }
    last
}

#[test]
fn completed_work_session_credits_task_history_and_sink() {
    let store = MemStore::default();
    let sink = CountingSink::default();
    let fired = sink.fired.clone();
    let mut app = App::load(store.clone(), Box::new(sink), minute_settings());

    let task = Task::new("write report", 3);
    let task_id = task.id.clone();
    app.add_task(task).unwrap();
    app.set_current_task(Some(task_id.clone())).unwrap();

    let event = run_full_phase(&mut app);
    match event {
        Some(Event::WorkSessionCompleted {
            task_id: credited, ..
        }) => assert_eq!(credited.as_deref(), Some(task_id.as_str())),
        other => panic!("Expected WorkSessionCompleted, got {other:?}"),
    }

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(app.tasks().get(&task_id).unwrap().completed_pomodoros, 1);
    assert_eq!(app.history().completed_on(today()), 1);
    assert_eq!(app.engine().phase(), Phase::ShortBreak);
    assert!(!app.engine().is_running());

    // Full snapshots landed in the store.
    let records = store.records.borrow();
    assert!(records.get(TASKS_KEY).unwrap().contains(&task_id));
    assert!(records.get(HISTORY_KEY).unwrap().contains("2026-08-06"));
    assert!(records.contains_key(ENGINE_KEY));
}

#[test]
fn long_break_cadence_counts_completed_sessions_only() {
    let mut app = App::load(
        MemStore::default(),
        Box::new(CountingSink::default()),
        minute_settings(),
    );

    // Session 1 -> short break (interval is 2).
    run_full_phase(&mut app);
    assert_eq!(app.engine().phase(), Phase::ShortBreak);
    run_full_phase(&mut app);
    assert_eq!(app.engine().phase(), Phase::Work);

    // A skipped work phase must not advance the cadence.
    app.skip().unwrap();
    assert_eq!(app.engine().phase(), Phase::ShortBreak);
    app.skip().unwrap();

    // Session 2 -> long break.
    run_full_phase(&mut app);
    assert_eq!(app.engine().phase(), Phase::LongBreak);
    assert_eq!(app.engine().completed_sessions(), 2);
    assert_eq!(app.history().completed_on(today()), 2);
}

#[test]
fn break_completion_notifies_but_records_nothing() {
    let store = MemStore::default();
    let sink = CountingSink::default();
    let fired = sink.fired.clone();
    let mut app = App::load(store, Box::new(sink), minute_settings());

    run_full_phase(&mut app);
    assert_eq!(app.history().completed_on(today()), 1);

    let event = run_full_phase(&mut app);
    assert!(matches!(event, Some(Event::BreakCompleted { .. })));
    assert_eq!(fired.load(Ordering::SeqCst), 2);
    // History unchanged by the break.
    assert_eq!(app.history().completed_on(today()), 1);
}

#[test]
fn sink_failure_never_corrupts_completion_handling() {
    let mut app = App::load(MemStore::default(), Box::new(BrokenSink), minute_settings());
    let event = run_full_phase(&mut app);
    assert!(matches!(event, Some(Event::WorkSessionCompleted { .. })));
    assert_eq!(app.history().completed_on(today()), 1);
    assert_eq!(app.engine().phase(), Phase::ShortBreak);
}

#[test]
fn unknown_task_id_still_records_history() {
    let mut app = App::load(
        MemStore::default(),
        Box::new(CountingSink::default()),
        minute_settings(),
    );
    app.set_current_task(Some("ghost".into())).unwrap();
    run_full_phase(&mut app);
    assert_eq!(app.history().completed_on(today()), 1);
    assert!(app.tasks().is_empty());
}

#[test]
fn snapshots_survive_reload_but_session_counter_does_not() {
    let store = MemStore::default();
    {
        let mut app = App::load(
            store.clone(),
            Box::new(CountingSink::default()),
            minute_settings(),
        );
        app.add_task(Task::new("carry me over", 2)).unwrap();
        run_full_phase(&mut app);
        assert_eq!(app.engine().completed_sessions(), 1);
    }

    let app = App::load(
        store,
        Box::new(CountingSink::default()),
        minute_settings(),
    );
    assert_eq!(app.tasks().len(), 1);
    assert_eq!(app.history().completed_on(today()), 1);
    // Phase persisted; the in-process counter restarted.
    assert_eq!(app.engine().phase(), Phase::ShortBreak);
    assert_eq!(app.engine().completed_sessions(), 0);
}

#[test]
fn malformed_records_fall_back_to_defaults() {
    let store = MemStore::default();
    store.set(TASKS_KEY, "{not json").unwrap();
    store.set(HISTORY_KEY, "42").unwrap();
    store.set(ENGINE_KEY, "").unwrap();

    let app = App::load(
        store,
        Box::new(CountingSink::default()),
        Settings::default(),
    );
    assert!(app.tasks().is_empty());
    assert!(app.history().is_empty());
    assert_eq!(app.engine().phase(), Phase::Work);
    assert_eq!(app.engine().remaining_secs(), 25 * 60);
}

#[test]
fn apply_settings_reloads_current_phase() {
    let mut app = App::load(
        MemStore::default(),
        Box::new(CountingSink::default()),
        minute_settings(),
    );
    app.start().unwrap();
    app.tick(today()).unwrap();
    assert_eq!(app.engine().remaining_secs(), 59);

    let mut settings = app.settings().clone();
    settings.set("work", "2").unwrap();
    // Saving settings touches the real settings path; point it at a sandbox.
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("POMOFOCUS_DATA_DIR", dir.path());
    app.apply_settings(settings).unwrap();
    std::env::remove_var("POMOFOCUS_DATA_DIR");

    assert_eq!(app.engine().remaining_secs(), 2 * 60);
    assert_eq!(app.engine().total_secs(), 2 * 60);
    assert!(app.engine().is_running());
}

#[test]
fn metrics_reflect_the_produced_history() {
    let mut app = App::load(
        MemStore::default(),
        Box::new(CountingSink::default()),
        minute_settings(),
    );
    for _ in 0..3 {
        run_full_phase(&mut app); // work
        run_full_phase(&mut app); // break
    }

    let metrics = app.metrics(today());
    assert_eq!(metrics.today, 3);
    assert_eq!(metrics.streak, 1);
    // streak 1, average 3/1 -> round(10 + 15) = 25.
    assert_eq!(metrics.score, 25);
    assert_eq!(metrics.last_7_days.len(), 7);
    assert_eq!(metrics.last_7_days[6].count, 3);
}
