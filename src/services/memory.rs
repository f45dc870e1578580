//! In-process session state: XP counter, last-seen prompts, and the three
//! interaction history logs.
//!
//! One instance is shared by every request for the life of the process; all
//! mutation goes through a single mutex so appends, awards, and the full
//! clear are each atomic from the caller's perspective.

use crate::models::{ChatRecord, EmailRecord, TaskRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// History reads window to this many most-recent entries per log. Writes are
/// unbounded; truncation happens on read only.
pub const HISTORY_WINDOW: usize = 20;

const STARTING_XP: i64 = 500;

/// XP gain table. A missing or empty action maps to the default action
/// before lookup; only explicitly unrecognized labels earn the default gain.
#[derive(Debug, Clone)]
pub struct XpTable {
    gains: HashMap<String, i64>,
    default_action: String,
    default_gain: i64,
}

impl Default for XpTable {
    fn default() -> Self {
        let gains = [("chat", 10), ("task", 20), ("email", 15)]
            .into_iter()
            .map(|(action, gain)| (action.to_string(), gain))
            .collect();

        Self {
            gains,
            default_action: "chat".to_string(),
            default_gain: 5,
        }
    }
}

impl XpTable {
    pub fn new(gains: HashMap<String, i64>, default_action: String, default_gain: i64) -> Self {
        Self {
            gains,
            default_action,
            default_gain,
        }
    }

    /// Resolve an optional client-declared action label to the canonical
    /// action name and its gain.
    pub fn gain_for(&self, action: Option<&str>) -> (String, i64) {
        let action = action
            .filter(|a| !a.is_empty())
            .map(str::to_lowercase)
            .unwrap_or_else(|| self.default_action.clone());

        let gain = self.gains.get(&action).copied().unwrap_or(self.default_gain);
        (action, gain)
    }
}

/// Result of one XP award.
#[derive(Debug, Serialize)]
pub struct XpAward {
    pub action: String,
    pub xp_gained: i64,
    pub total_xp: i64,
}

/// Point-in-time view of the session counters for `/api/health`.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub xp: i64,
    pub last_chat: Option<String>,
    pub last_tasks: Option<String>,
}

/// Windowed view of the three history logs, insertion order preserved.
#[derive(Debug, Serialize)]
pub struct HistoryView {
    pub chats: Vec<ChatRecord>,
    pub tasks: Vec<TaskRecord>,
    pub emails: Vec<EmailRecord>,
}

#[derive(Debug)]
struct MemoryInner {
    xp: i64,
    last_chat: Option<String>,
    last_tasks: Option<String>,
    chats: Vec<ChatRecord>,
    tasks: Vec<TaskRecord>,
    emails: Vec<EmailRecord>,
}

/// Cloneable handle to the shared session state.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
    xp_table: Arc<XpTable>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_table(XpTable::default())
    }

    pub fn with_table(xp_table: XpTable) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryInner {
                xp: STARTING_XP,
                last_chat: None,
                last_tasks: None,
                chats: Vec::new(),
                tasks: Vec::new(),
                emails: Vec::new(),
            })),
            xp_table: Arc::new(xp_table),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // A poisoned lock only means another request panicked mid-update;
        // the state itself is still usable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Remember the latest chat prompt (also written by the email endpoint).
    pub fn note_chat_prompt(&self, text: &str) {
        self.lock().last_chat = Some(text.to_string());
    }

    pub fn record_chat(&self, user: &str, ai: &str) {
        self.lock().chats.push(ChatRecord::new(user, ai));
    }

    /// Append a task record and remember the generated items.
    pub fn record_tasks(&self, goal: &str, items: &str) {
        let mut inner = self.lock();
        inner.last_tasks = Some(items.to_string());
        inner.tasks.push(TaskRecord::new(goal, items));
    }

    pub fn record_email(&self, thread: &str, draft: &str) {
        self.lock().emails.push(EmailRecord::new(thread, draft));
    }

    pub fn award_xp(&self, action: Option<&str>) -> XpAward {
        let (action, gain) = self.xp_table.gain_for(action);
        let mut inner = self.lock();
        inner.xp += gain;

        XpAward {
            action,
            xp_gained: gain,
            total_xp: inner.xp,
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.lock();
        SessionSnapshot {
            xp: inner.xp,
            last_chat: inner.last_chat.clone(),
            last_tasks: inner.last_tasks.clone(),
        }
    }

    /// The most recent `HISTORY_WINDOW` entries of each log, oldest of the
    /// window first.
    pub fn recent_history(&self) -> HistoryView {
        let inner = self.lock();
        HistoryView {
            chats: tail(&inner.chats),
            tasks: tail(&inner.tasks),
            emails: tail(&inner.emails),
        }
    }

    /// Discard all entries in all three logs.
    pub fn clear_history(&self) {
        let mut inner = self.lock();
        inner.chats.clear();
        inner.tasks.clear();
        inner.emails.clear();
    }
}

fn tail<T: Clone>(items: &[T]) -> Vec<T> {
    let start = items.len().saturating_sub(HISTORY_WINDOW);
    items[start..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_starts_at_500_and_accumulates_per_table() {
        let store = MemoryStore::new();

        let award = store.award_xp(Some("task"));
        assert_eq!(award.action, "task");
        assert_eq!(award.xp_gained, 20);
        assert_eq!(award.total_xp, 520);

        let award = store.award_xp(Some("email"));
        assert_eq!(award.xp_gained, 15);
        assert_eq!(award.total_xp, 535);
    }

    #[test]
    fn missing_or_empty_action_falls_back_to_chat_not_default_gain() {
        let store = MemoryStore::new();

        let award = store.award_xp(None);
        assert_eq!(award.action, "chat");
        assert_eq!(award.xp_gained, 10);

        let award = store.award_xp(Some(""));
        assert_eq!(award.action, "chat");
        assert_eq!(award.xp_gained, 10);
    }

    #[test]
    fn unrecognized_action_earns_default_gain() {
        let store = MemoryStore::new();
        let award = store.award_xp(Some("dance"));
        assert_eq!(award.action, "dance");
        assert_eq!(award.xp_gained, 5);
    }

    #[test]
    fn action_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        let award = store.award_xp(Some("TASK"));
        assert_eq!(award.action, "task");
        assert_eq!(award.xp_gained, 20);
    }

    #[test]
    fn history_reads_window_to_most_recent_20_in_order() {
        let store = MemoryStore::new();
        for i in 0..25 {
            store.record_chat(&format!("question {}", i), "reply");
        }

        let history = store.recent_history();
        assert_eq!(history.chats.len(), 20);
        assert_eq!(history.chats[0].user, "question 5");
        assert_eq!(history.chats[19].user, "question 24");
    }

    #[test]
    fn clear_empties_all_three_logs() {
        let store = MemoryStore::new();
        store.record_chat("q", "a");
        store.record_tasks("goal", "items");
        store.record_email("thread", "draft");

        store.clear_history();

        let history = store.recent_history();
        assert!(history.chats.is_empty());
        assert!(history.tasks.is_empty());
        assert!(history.emails.is_empty());
    }

    #[test]
    fn record_tasks_updates_last_tasks_snapshot() {
        let store = MemoryStore::new();
        store.record_tasks("ship it", "- a\n- b\n- c");

        let snapshot = store.snapshot();
        assert_eq!(snapshot.last_tasks.as_deref(), Some("- a\n- b\n- c"));
        assert_eq!(snapshot.xp, 500);
    }
}
