//! Daily completion history.
//!
//! One entry per calendar day, counting completed work sessions. The score
//! engine reads this; the application shell writes it on every completion.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Completed work sessions for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub completed: u32,
}

/// Completion counts keyed by calendar day. At most one entry per date;
/// insertion order is irrelevant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FocusHistory {
    entries: Vec<HistoryEntry>,
}

impl FocusHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit one completed work session to `date`. Creates the day's entry
    /// with `completed = 1` if absent, otherwise increments it.
    pub fn record(&mut self, date: NaiveDate) {
        match self.entries.iter_mut().find(|e| e.date == date) {
            Some(entry) => entry.completed += 1,
            None => self.entries.push(HistoryEntry { date, completed: 1 }),
        }
    }

    /// Completed count for `date`, 0 when the day has no entry.
    pub fn completed_on(&self, date: NaiveDate) -> u32 {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.completed)
            .unwrap_or(0)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of completed sessions across all history.
    pub fn total_completed(&self) -> u32 {
        self.entries.iter().map(|e| e.completed).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn record_creates_then_increments() {
        let mut history = FocusHistory::new();
        history.record(day("2026-08-06"));
        assert_eq!(history.completed_on(day("2026-08-06")), 1);
        history.record(day("2026-08-06"));
        assert_eq!(history.completed_on(day("2026-08-06")), 2);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn separate_days_get_separate_entries() {
        let mut history = FocusHistory::new();
        history.record(day("2026-08-05"));
        history.record(day("2026-08-06"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.total_completed(), 2);
    }

    #[test]
    fn missing_day_counts_zero() {
        let history = FocusHistory::new();
        assert_eq!(history.completed_on(day("2026-08-06")), 0);
    }

    #[test]
    fn serializes_as_plain_entry_array() {
        let mut history = FocusHistory::new();
        history.record(day("2026-08-06"));
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"[{"date":"2026-08-06","completed":1}]"#);
        let restored: FocusHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);
    }
}
