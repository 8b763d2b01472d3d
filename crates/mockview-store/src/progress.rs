//! Saved progress for an unfinished interview, one slot per user.

use std::sync::Arc;

use mockview_core::session::SavedProgress;

use crate::error::StoreError;
use crate::kv::{get_json, set_json, KeyValueStore};

fn progress_key(email: &str) -> String {
    format!("interview-progress-{email}")
}

#[derive(Clone)]
pub struct ProgressStore {
    store: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Overwrites any earlier save for this user.
    pub fn save(&self, email: &str, progress: &SavedProgress) -> Result<(), StoreError> {
        set_json(self.store.as_ref(), &progress_key(email), progress)?;
        tracing::debug!(
            email,
            next_question = progress.current_question,
            "interview progress saved"
        );
        Ok(())
    }

    pub fn load(&self, email: &str) -> Result<Option<SavedProgress>, StoreError> {
        get_json(self.store.as_ref(), &progress_key(email))
    }

    pub fn clear(&self, email: &str) -> Result<(), StoreError> {
        self.store.delete(&progress_key(email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use mockview_core::model::{Difficulty, FeedbackItem, FeedbackKind, InterviewConfig, JobLevel};
    use mockview_core::questions::QuestionSet;
    use mockview_core::session::InterviewSession;

    fn session_with_two_answers() -> InterviewSession {
        let config = InterviewConfig {
            job_role: "Chef".into(),
            job_level: JobLevel::Mid,
            difficulty: Difficulty::Medium,
        };
        let mut session =
            InterviewSession::new(config, QuestionSet::fallback(Difficulty::Medium, JobLevel::Mid))
                .unwrap();
        for answer in ["I run the pass", "We prep at dawn"] {
            session
                .submit_answer(answer, vec![FeedbackItem::new(FeedbackKind::Tip, "more")])
                .unwrap();
        }
        session.add_elapsed(95);
        session
    }

    #[test]
    fn save_load_clear() {
        let progress = ProgressStore::new(Arc::new(MemoryStore::new()));
        assert!(progress.load("a@b.co").unwrap().is_none());

        let snapshot = session_with_two_answers().snapshot();
        progress.save("a@b.co", &snapshot).unwrap();

        let loaded = progress.load("a@b.co").unwrap().unwrap();
        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.current_question, 2);
        assert!(progress.load("other@b.co").unwrap().is_none());

        let restored = InterviewSession::restore(loaded).unwrap();
        assert_eq!(restored.elapsed_secs(), 95);

        progress.clear("a@b.co").unwrap();
        assert!(progress.load("a@b.co").unwrap().is_none());
    }
}
