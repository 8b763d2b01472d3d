//! Interview question sets: parsing model output and the static fallback bank.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, JobLevel, QUESTION_COUNT};

const EMBEDDED_BANK: &str = include_str!("../data/fallback_questions.toml");

/// Where a question set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSource {
    /// Written by the language model for this role.
    Generated,
    /// Taken from the static bank.
    Fallback,
}

/// The questions for one interview, in the order they are asked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub questions: Vec<String>,
    pub source: QuestionSource,
}

impl QuestionSet {
    /// Build a set from raw model output, falling back to the static bank
    /// when fewer than [`QUESTION_COUNT`] numbered questions are present.
    pub fn from_model_output(text: &str, difficulty: Difficulty, level: JobLevel) -> Self {
        let mut parsed = parse_numbered_questions(text);
        if parsed.len() >= QUESTION_COUNT {
            parsed.truncate(QUESTION_COUNT);
            Self {
                questions: parsed,
                source: QuestionSource::Generated,
            }
        } else {
            tracing::warn!(
                parsed = parsed.len(),
                "model returned too few numbered questions, using fallback bank"
            );
            Self::fallback(difficulty, level)
        }
    }

    /// The static question set for a difficulty and level.
    pub fn fallback(difficulty: Difficulty, level: JobLevel) -> Self {
        Self {
            questions: QuestionBank::embedded().questions(difficulty, level).to_vec(),
            source: QuestionSource::Fallback,
        }
    }
}

fn numbered_line() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\.\s*").expect("static regex"))
}

/// Extract questions from lines of the form `N. question`.
///
/// Lines without a leading number are ignored, so preambles and trailing
/// notes from the model do not leak into the question list. A number with
/// no text after it (`5.`) is not a question and is dropped as well.
pub fn parse_numbered_questions(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| numbered_line().is_match(line))
        .map(|line| numbered_line().replace(line, "").trim().to_string())
        .filter(|q| !q.is_empty())
        .collect()
}

#[derive(Debug, Deserialize)]
struct TomlBank {
    easy: TomlLevels,
    medium: TomlLevels,
    hard: TomlLevels,
}

#[derive(Debug, Deserialize)]
struct TomlLevels {
    entry: Vec<String>,
    mid: Vec<String>,
    senior: Vec<String>,
}

/// Static questions keyed by difficulty and job level.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    // Indexed [difficulty][level].
    sets: [[Vec<String>; 3]; 3],
}

impl QuestionBank {
    /// Parse a bank from TOML with one table per difficulty and one array
    /// per job level. Every array must hold exactly [`QUESTION_COUNT`] entries.
    pub fn from_toml(content: &str) -> Result<Self> {
        let parsed: TomlBank = toml::from_str(content).context("failed to parse question bank")?;

        let levels = |name: &str, l: TomlLevels| -> Result<[Vec<String>; 3]> {
            for (level, qs) in [("entry", &l.entry), ("mid", &l.mid), ("senior", &l.senior)] {
                anyhow::ensure!(
                    qs.len() == QUESTION_COUNT,
                    "question bank {name}.{level} has {} questions, expected {QUESTION_COUNT}",
                    qs.len()
                );
            }
            Ok([l.entry, l.mid, l.senior])
        };

        Ok(Self {
            sets: [
                levels("easy", parsed.easy)?,
                levels("medium", parsed.medium)?,
                levels("hard", parsed.hard)?,
            ],
        })
    }

    /// The bank compiled into the binary.
    pub fn embedded() -> &'static QuestionBank {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| {
            QuestionBank::from_toml(EMBEDDED_BANK).expect("embedded question bank is valid")
        })
    }

    pub fn questions(&self, difficulty: Difficulty, level: JobLevel) -> &[String] {
        let d = match difficulty {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        };
        let l = match level {
            JobLevel::Entry => 0,
            JobLevel::Mid => 1,
            JobLevel::Senior => 2,
        };
        &self.sets[d][l]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> String {
        (1..=n)
            .map(|i| format!("{i}. Question number {i}?"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn parses_numbered_lines_and_skips_prose() {
        let text = "Here are your questions:\n\n1. First?\n2.Second?\n   3.   Third?\nThanks!";
        assert_eq!(
            parse_numbered_questions(text),
            vec!["First?", "Second?", "Third?"]
        );
    }

    #[test]
    fn ignores_lines_without_number_prefix() {
        let text = "- 1. bullet\nQ1. nope\n10. Tenth";
        assert_eq!(parse_numbered_questions(text), vec!["Tenth"]);
    }

    #[test]
    fn bare_numbers_are_dropped() {
        let text = "1. First?\n2.\n3.   \n4. Fourth?";
        assert_eq!(parse_numbered_questions(text), vec!["First?", "Fourth?"]);

        // Nine real questions plus a bare "10." is not a full set.
        let short = format!("{}\n10.", numbered(9));
        let set = QuestionSet::from_model_output(&short, Difficulty::Medium, JobLevel::Mid);
        assert_eq!(set.source, QuestionSource::Fallback);
    }

    #[test]
    fn full_model_output_is_used() {
        let set = QuestionSet::from_model_output(&numbered(12), Difficulty::Hard, JobLevel::Mid);
        assert_eq!(set.source, QuestionSource::Generated);
        assert_eq!(set.questions.len(), QUESTION_COUNT);
        assert_eq!(set.questions[0], "Question number 1?");
        assert_eq!(set.questions[9], "Question number 10?");
    }

    #[test]
    fn short_model_output_falls_back() {
        let set = QuestionSet::from_model_output(&numbered(9), Difficulty::Easy, JobLevel::Senior);
        assert_eq!(set.source, QuestionSource::Fallback);
        assert_eq!(
            set.questions,
            QuestionBank::embedded().questions(Difficulty::Easy, JobLevel::Senior)
        );
    }

    #[test]
    fn embedded_bank_has_every_combination() {
        let bank = QuestionBank::embedded();
        for difficulty in Difficulty::all() {
            for level in JobLevel::all() {
                let qs = bank.questions(difficulty, level);
                assert_eq!(qs.len(), QUESTION_COUNT, "{difficulty}/{level}");
                assert!(qs.iter().all(|q| !q.trim().is_empty()));
            }
        }
        assert!(bank.questions(Difficulty::Easy, JobLevel::Entry)[0]
            .starts_with("Walk me through your background"));
    }

    #[test]
    fn bank_rejects_wrong_question_count() {
        let toml = r#"
[easy]
entry = ["only one"]
mid = []
senior = []
[medium]
entry = []
mid = []
senior = []
[hard]
entry = []
mid = []
senior = []
"#;
        let err = QuestionBank::from_toml(toml).unwrap_err();
        assert!(err.to_string().contains("easy.entry"));
    }
}
