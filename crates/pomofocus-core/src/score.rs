//! Focus score derivation.
//!
//! Pure functions over the completion history. The caller supplies "today"
//! so the engine never reads a clock, and identical inputs always produce
//! identical output.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::history::FocusHistory;

/// Longest backward walk when counting a streak. Bounds termination even
/// against malformed history input.
const STREAK_WALK_CAP: u32 = 99;

/// Days covered by the trend series.
const TREND_DAYS: u64 = 7;

/// Qualitative tier for a focus score, first matching threshold from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreTier {
    Master,
    Expert,
    Intermediate,
    Beginner,
    Novice,
}

impl ScoreTier {
    pub fn from_score(score: u32) -> Self {
        if score >= 100 {
            ScoreTier::Master
        } else if score >= 70 {
            ScoreTier::Expert
        } else if score >= 40 {
            ScoreTier::Intermediate
        } else if score >= 20 {
            ScoreTier::Beginner
        } else {
            ScoreTier::Novice
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Master => "Master",
            ScoreTier::Expert => "Expert",
            ScoreTier::Intermediate => "Intermediate",
            ScoreTier::Beginner => "Beginner",
            ScoreTier::Novice => "Novice",
        }
    }
}

/// One day of the 7-day trend, labeled with the short weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCount {
    pub label: String,
    pub count: u32,
}

/// Derived metrics, recomputed from history on demand and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusMetrics {
    pub streak: u32,
    pub today: u32,
    pub score: u32,
    pub tier: ScoreTier,
    /// Exactly 7 entries, oldest first, ending at today.
    pub last_7_days: Vec<DayCount>,
}

/// Compute the full metric set for `today`.
pub fn compute_metrics(history: &FocusHistory, today: NaiveDate) -> FocusMetrics {
    let streak = streak(history, today);
    let score = score(history, streak);
    FocusMetrics {
        streak,
        today: history.completed_on(today),
        score,
        tier: ScoreTier::from_score(score),
        last_7_days: last_7_days(history, today),
    }
}

/// Consecutive calendar days ending at `today` with at least one completed
/// session. A day without completions - including today itself - ends the
/// count.
fn streak(history: &FocusHistory, today: NaiveDate) -> u32 {
    if history.completed_on(today) == 0 {
        return 0;
    }
    let mut streak = 1;
    let mut day = today;
    for _ in 0..STREAK_WALK_CAP {
        day = match day.checked_sub_days(Days::new(1)) {
            Some(prev) => prev,
            None => break,
        };
        if history.completed_on(day) == 0 {
            break;
        }
        streak += 1;
    }
    streak
}

/// `round(streak * 10 + average * 5)`, where the average divides the total
/// completed count across all history by `min(entry_count, 7)`. The
/// denominator counts history entries, not trailing calendar days.
fn score(history: &FocusHistory, streak: u32) -> u32 {
    let average = if history.is_empty() {
        0.0
    } else {
        f64::from(history.total_completed()) / history.len().min(7) as f64
    };
    (f64::from(streak) * 10.0 + average * 5.0).round() as u32
}

/// The 7 calendar days ending at `today` inclusive, oldest first, each with
/// its completed count (0 for days without an entry).
fn last_7_days(history: &FocusHistory, today: NaiveDate) -> Vec<DayCount> {
    (0..TREND_DAYS)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .map(|date| DayCount {
            label: date.format("%a").to_string(),
            count: history.completed_on(date),
        })
        .collect()
}
