//! Task list and per-task progress.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unit of work estimated in pomodoros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub estimated_pomodoros: u32,
    pub completed_pomodoros: u32,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a task with a fresh id. Estimates below 1 are bumped to 1.
    pub fn new(title: impl Into<String>, estimated_pomodoros: u32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            estimated_pomodoros: estimated_pomodoros.max(1),
            completed_pomodoros: 0,
            created_at: Utc::now(),
        }
    }

    /// Completion ratio in percent, clamped to 100.
    pub fn progress(&self) -> f64 {
        if self.estimated_pomodoros == 0 {
            return 0.0;
        }
        (f64::from(self.completed_pomodoros) / f64::from(self.estimated_pomodoros) * 100.0)
            .min(100.0)
    }
}

/// The task collection. Owns every task; the timer engine only ever holds a
/// task id, never a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Update title and/or estimate. Returns false when the id is unknown.
    pub fn edit(&mut self, id: &str, title: Option<String>, estimate: Option<u32>) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(estimate) = estimate {
            task.estimated_pomodoros = estimate.max(1);
        }
        true
    }

    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Credit one completed pomodoro to `id`.
    ///
    /// Unknown ids are logged and ignored - the task may have been removed
    /// while its session was still running.
    pub fn record_completed(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed_pomodoros += 1;
                true
            }
            None => {
                tracing::warn!(task_id = id, "completed session for unknown task");
                false
            }
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
