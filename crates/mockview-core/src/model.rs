//! Core data model types for mockview.
//!
//! These are the types every other crate uses to describe an interview:
//! what is being practiced, how hard it is, and what came back from the
//! coach for each answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::grade::Grade;

/// Number of questions in every interview.
pub const QUESTION_COUNT: usize = 10;

/// How demanding the interview questions are, and how scores are weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Multiplier applied to the raw point total before rounding.
    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.15,
        }
    }

    pub fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Seniority of the role being interviewed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum JobLevel {
    #[default]
    Entry,
    Mid,
    Senior,
}

impl JobLevel {
    /// Long-form description used in prompts.
    pub fn description(self) -> &'static str {
        match self {
            JobLevel::Entry => "entry-level (0-2 years experience)",
            JobLevel::Mid => "mid-level (3-7 years experience)",
            JobLevel::Senior => "senior-level (8+ years experience)",
        }
    }

    pub fn all() -> [JobLevel; 3] {
        [JobLevel::Entry, JobLevel::Mid, JobLevel::Senior]
    }
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobLevel::Entry => write!(f, "entry"),
            JobLevel::Mid => write!(f, "mid"),
            JobLevel::Senior => write!(f, "senior"),
        }
    }
}

impl FromStr for JobLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entry" | "junior" => Ok(JobLevel::Entry),
            "mid" | "intermediate" => Ok(JobLevel::Mid),
            "senior" => Ok(JobLevel::Senior),
            other => Err(format!("unknown job level: {other}")),
        }
    }
}

/// What the user wants to practice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterviewConfig {
    /// Free-text job role, e.g. "Data Engineer".
    pub job_role: String,
    pub job_level: JobLevel,
    pub difficulty: Difficulty,
}

/// Category of a single feedback item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// Free-form coaching text from the language model.
    Detailed,
    Warning,
    Tip,
    Success,
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackKind::Detailed => write!(f, "detailed"),
            FeedbackKind::Warning => write!(f, "warning"),
            FeedbackKind::Tip => write!(f, "tip"),
            FeedbackKind::Success => write!(f, "success"),
        }
    }
}

/// One piece of feedback on an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub text: String,
}

impl FeedbackItem {
    pub fn new(kind: FeedbackKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// All feedback items for one answer, in display order.
pub type AnswerFeedback = Vec<FeedbackItem>;

/// A finished interview as shown in the user's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub job_role: String,
    pub job_level: JobLevel,
    pub difficulty: Difficulty,
    pub score: u32,
    pub grade: Grade,
    pub date: DateTime<Utc>,
    /// Total interview time formatted as `m:ss`.
    pub time: String,
    pub answers_count: usize,
}

/// Format whole seconds as `m:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Number of whitespace-delimited words in a trimmed answer.
///
/// An all-whitespace answer counts as one word.
pub fn word_count(answer: &str) -> usize {
    answer.split_whitespace().count().max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!("EASY".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" medium ".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn job_level_display_and_parse() {
        assert_eq!(JobLevel::Mid.to_string(), "mid");
        assert_eq!("senior".parse::<JobLevel>().unwrap(), JobLevel::Senior);
        assert_eq!("junior".parse::<JobLevel>().unwrap(), JobLevel::Entry);
        assert!("intern".parse::<JobLevel>().is_err());
    }

    #[test]
    fn multipliers() {
        assert_eq!(Difficulty::Easy.multiplier(), 0.85);
        assert_eq!(Difficulty::Medium.multiplier(), 1.0);
        assert_eq!(Difficulty::Hard.multiplier(), 1.15);
    }

    #[test]
    fn elapsed_formatting() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(1200), "20:00");
    }

    #[test]
    fn word_count_trims_and_splits_on_any_whitespace() {
        assert_eq!(word_count("  one two\tthree\nfour  "), 4);
        assert_eq!(word_count("single"), 1);
        assert_eq!(word_count("   "), 1);
    }

    #[test]
    fn feedback_item_serializes_kind_as_type() {
        let item = FeedbackItem::new(FeedbackKind::Tip, "use STAR");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "tip");
        assert_eq!(json["text"], "use STAR");
    }
}
