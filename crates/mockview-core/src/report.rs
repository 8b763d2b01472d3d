//! Finished-interview reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::grade::Grade;
use crate::model::{format_elapsed, AnswerFeedback, HistoryEntry, InterviewConfig};
use crate::questions::QuestionSet;
use crate::scoring::ScoreBreakdown;
use crate::session::{InterviewOutcome, InterviewSession};

/// Everything shown on the results screen for one interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub user_email: Option<String>,
    pub config: InterviewConfig,
    pub questions: QuestionSet,
    pub answers: Vec<String>,
    pub feedback: Vec<AnswerFeedback>,
    pub elapsed_secs: u64,
    pub breakdown: ScoreBreakdown,
    pub score: u32,
    pub grade: Grade,
    pub grade_feedback: String,
    /// Decorative estimate; not derived deterministically from the score.
    pub hire_chance: u32,
}

impl InterviewReport {
    pub fn new(
        session: &InterviewSession,
        outcome: InterviewOutcome,
        grade_feedback: String,
        hire_chance: u32,
        user_email: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            user_email,
            config: session.config().clone(),
            questions: session.questions().clone(),
            answers: session.answers().to_vec(),
            feedback: session.feedback().to_vec(),
            elapsed_secs: session.elapsed_secs(),
            score: outcome.score,
            grade: outcome.grade,
            breakdown: outcome.breakdown,
            grade_feedback,
            hire_chance,
        }
    }

    /// Total time formatted as `m:ss`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    /// The condensed record kept in the user's history.
    pub fn history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            job_role: self.config.job_role.clone(),
            job_level: self.config.job_level,
            difficulty: self.config.difficulty,
            score: self.score,
            grade: self.grade,
            date: self.created_at,
            time: self.elapsed_display(),
            answers_count: self.answers.len(),
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: InterviewReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
