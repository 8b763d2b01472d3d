//! Bounded per-user interview history, newest first.

use std::sync::Arc;

use mockview_core::model::HistoryEntry;

use crate::error::StoreError;
use crate::kv::{get_json, set_json, KeyValueStore};

/// Entries kept per user.
pub const HISTORY_LIMIT: usize = 10;

fn history_key(email: &str) -> String {
    format!("interview-history-{email}")
}

#[derive(Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Newest first. A user with no interviews has an empty history.
    pub fn load(&self, email: &str) -> Result<Vec<HistoryEntry>, StoreError> {
        Ok(get_json(self.store.as_ref(), &history_key(email))?.unwrap_or_default())
    }

    /// Prepend `entry`, drop anything past [`HISTORY_LIMIT`], and return the new list.
    pub fn record(&self, email: &str, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, StoreError> {
        let mut history = self.load(email)?;
        history.insert(0, entry);
        history.truncate(HISTORY_LIMIT);
        set_json(self.store.as_ref(), &history_key(email), &history)?;
        tracing::debug!(email, entries = history.len(), "history updated");
        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileStore, MemoryStore};
    use chrono::Utc;
    use mockview_core::grade::classify;
    use mockview_core::model::{Difficulty, JobLevel};
    use uuid::Uuid;

    fn entry(score: u32) -> HistoryEntry {
        HistoryEntry {
            id: Uuid::new_v4(),
            job_role: "Pilot".into(),
            job_level: JobLevel::Senior,
            difficulty: Difficulty::Hard,
            score,
            grade: classify(score),
            date: Utc::now(),
            time: "9:05".into(),
            answers_count: 10,
        }
    }

    #[test]
    fn empty_history() {
        let history = HistoryStore::new(Arc::new(MemoryStore::new()));
        assert!(history.load("x@y.z").unwrap().is_empty());
    }

    #[test]
    fn keeps_newest_ten_first() {
        let history = HistoryStore::new(Arc::new(MemoryStore::new()));
        for score in 0..12 {
            history.record("x@y.z", entry(score)).unwrap();
        }
        let entries = history.load("x@y.z").unwrap();
        assert_eq!(entries.len(), HISTORY_LIMIT);
        assert_eq!(entries[0].score, 11);
        assert_eq!(entries[9].score, 2);
    }

    #[test]
    fn history_is_per_user_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let history = HistoryStore::new(Arc::new(FileStore::new(dir.path())));
        history.record("a@b.co", entry(80)).unwrap();
        history.record("c@d.co", entry(40)).unwrap();

        let reopened = HistoryStore::new(Arc::new(FileStore::new(dir.path())));
        let a = reopened.load("a@b.co").unwrap();
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].score, 80);
        assert_eq!(reopened.load("c@d.co").unwrap()[0].score, 40);
    }
}
