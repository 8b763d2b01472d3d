//! Deterministic answer scoring.
//!
//! A finished interview is scored from the answer text alone, the total
//! time spent, and the difficulty. Each answer earns points for length,
//! for concrete detail, and for speaking in a personal voice; the session
//! earns a pacing bonus; the total is scaled by the difficulty multiplier
//! and clamped into `0..=100`.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::model::{word_count, Difficulty};

/// Upper bound of every score.
pub const MAX_SCORE: u32 = 100;

const DETAIL_PHRASES: [&str; 3] = ["example", "for instance", "specifically"];
const DETAIL_BONUS: u32 = 3;
const PERSONAL_BONUS: u32 = 3;
const PERSONAL_WORD_THRESHOLD: usize = 5;

fn personal_words() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(?-u:\b)(?:i|my|we|our)(?-u:\b)").expect("static regex"))
}

/// Points for answer length, by word-count tier.
pub fn length_points(words: usize) -> u32 {
    match words {
        100.. => 14,
        50..=99 => 10,
        30..=49 => 6,
        _ => 2,
    }
}

/// Whether the answer mentions a concrete example.
pub fn has_detail(answer: &str) -> bool {
    let lower = answer.to_lowercase();
    DETAIL_PHRASES.iter().any(|p| lower.contains(p))
}

/// Whole-word, case-insensitive count of "I", "my", "we" and "our".
///
/// Word boundaries are ASCII: a non-ASCII letter next to one of the words
/// does not join it into a longer word.
pub fn personal_word_count(answer: &str) -> usize {
    personal_words().find_iter(answer).count()
}

/// Pacing bonus from the average number of seconds spent per answer.
pub fn time_bonus(average_secs: f64) -> u32 {
    if (60.0..=180.0).contains(&average_secs) {
        10
    } else if (30.0..=240.0).contains(&average_secs) {
        5
    } else {
        0
    }
}

/// Points earned by a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPoints {
    pub words: usize,
    pub length: u32,
    pub detail: u32,
    pub personal: u32,
}

impl AnswerPoints {
    pub fn score(answer: &str) -> Self {
        let words = word_count(answer.trim());
        Self {
            words,
            length: length_points(words),
            detail: if has_detail(answer) { DETAIL_BONUS } else { 0 },
            personal: if personal_word_count(answer) >= PERSONAL_WORD_THRESHOLD {
                PERSONAL_BONUS
            } else {
                0
            },
        }
    }

    pub fn total(&self) -> u32 {
        self.length + self.detail + self.personal
    }
}

/// Every intermediate value that went into a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub answers: Vec<AnswerPoints>,
    pub average_secs_per_answer: f64,
    pub time_bonus: u32,
    /// Sum of all answer points plus the time bonus.
    pub subtotal: u32,
    pub difficulty: Difficulty,
    pub multiplier: f64,
    /// Final score in `0..=100`.
    pub score: u32,
}

impl ScoreBreakdown {
    /// Score a completed set of answers.
    ///
    /// Fails with [`ScoringError::InvalidInput`] when `answers` is empty,
    /// since the pacing bonus is an average over answers.
    pub fn compute<S: AsRef<str>>(
        answers: &[S],
        difficulty: Difficulty,
        total_elapsed_secs: u64,
    ) -> Result<Self, ScoringError> {
        if answers.is_empty() {
            return Err(ScoringError::InvalidInput(
                "cannot score an interview with no answers".into(),
            ));
        }

        let points: Vec<AnswerPoints> = answers
            .iter()
            .map(|a| AnswerPoints::score(a.as_ref()))
            .collect();

        let average = total_elapsed_secs as f64 / answers.len() as f64;
        let time_bonus = time_bonus(average);
        let subtotal = points.iter().map(AnswerPoints::total).sum::<u32>() + time_bonus;

        let multiplier = difficulty.multiplier();
        let scaled = (subtotal as f64 * multiplier).round();
        let score = scaled.clamp(0.0, MAX_SCORE as f64) as u32;

        Ok(Self {
            answers: points,
            average_secs_per_answer: average,
            time_bonus,
            subtotal,
            difficulty,
            multiplier,
            score,
        })
    }
}

/// Compute the interview score in `0..=100`.
pub fn compute_score<S: AsRef<str>>(
    answers: &[S],
    difficulty: Difficulty,
    total_elapsed_secs: u64,
) -> Result<u32, ScoringError> {
    ScoreBreakdown::compute(answers, difficulty, total_elapsed_secs).map(|b| b.score)
}
