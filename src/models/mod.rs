//! History record types for the three interaction logs.
//!
//! Records are immutable once appended; `ts` is float epoch seconds, the
//! format the assistant UI already consumes.

use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChatRecord {
    pub user: String,
    pub ai: String,
    pub ts: f64,
}

impl ChatRecord {
    pub fn new(user: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            ai: ai.into(),
            ts: epoch_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub goal: String,
    /// Generated bullet list, kept as raw text.
    pub items: String,
    pub ts: f64,
}

impl TaskRecord {
    pub fn new(goal: impl Into<String>, items: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            items: items.into(),
            ts: epoch_seconds(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailRecord {
    pub thread: String,
    pub draft: String,
    pub ts: f64,
}

impl EmailRecord {
    pub fn new(thread: impl Into<String>, draft: impl Into<String>) -> Self {
        Self {
            thread: thread.into(),
            draft: draft.into(),
            ts: epoch_seconds(),
        }
    }
}

fn epoch_seconds() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
