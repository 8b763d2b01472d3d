//! The interview session state machine.
//!
//! A session starts with a fixed list of questions, accepts one answer at a
//! time in question order, and is finalized into a score once every
//! question has an answer. It can be snapshotted into [`SavedProgress`]
//! between answers and restored later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;
use crate::grade::{classify, Grade};
use crate::model::{AnswerFeedback, InterviewConfig};
use crate::questions::QuestionSet;
use crate::scoring::ScoreBreakdown;

/// An interview in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewSession {
    config: InterviewConfig,
    questions: QuestionSet,
    answers: Vec<String>,
    feedback: Vec<AnswerFeedback>,
    elapsed_secs: u64,
}

/// Result of finalizing a complete session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewOutcome {
    pub score: u32,
    pub grade: Grade,
    pub breakdown: ScoreBreakdown,
}

/// Snapshot of an unfinished interview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProgress {
    pub config: InterviewConfig,
    pub questions: QuestionSet,
    /// Index of the next question to answer.
    pub current_question: usize,
    pub answers: Vec<String>,
    pub feedback: Vec<AnswerFeedback>,
    pub elapsed_secs: u64,
    pub last_updated: DateTime<Utc>,
}

impl InterviewSession {
    /// Start a session. Fails if the role is blank or there are no questions.
    pub fn new(config: InterviewConfig, questions: QuestionSet) -> Result<Self, SessionError> {
        if config.job_role.trim().is_empty() {
            return Err(SessionError::MissingJobRole);
        }
        if questions.questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        Ok(Self {
            config,
            questions,
            answers: Vec::new(),
            feedback: Vec::new(),
            elapsed_secs: 0,
        })
    }

    pub fn config(&self) -> &InterviewConfig {
        &self.config
    }

    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn feedback(&self) -> &[AnswerFeedback] {
        &self.feedback
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn question_count(&self) -> usize {
        self.questions.questions.len()
    }

    /// Zero-based index of the next unanswered question.
    pub fn current_index(&self) -> usize {
        self.answers.len()
    }

    /// The next question to answer, or `None` once complete.
    pub fn current_question(&self) -> Option<&str> {
        self.questions
            .questions
            .get(self.answers.len())
            .map(String::as_str)
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() == self.question_count()
    }

    /// Add wall-clock time spent on the interview.
    pub fn add_elapsed(&mut self, secs: u64) {
        self.elapsed_secs = self.elapsed_secs.saturating_add(secs);
    }

    /// Check that `answer` may be submitted next, without recording it.
    pub fn validate_answer(&self, answer: &str) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::AlreadyComplete(self.answers.len()));
        }
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }
        Ok(())
    }

    /// Record the answer to the current question together with its feedback.
    pub fn submit_answer(
        &mut self,
        answer: impl Into<String>,
        feedback: AnswerFeedback,
    ) -> Result<(), SessionError> {
        let answer = answer.into();
        self.validate_answer(&answer)?;
        self.answers.push(answer);
        self.feedback.push(feedback);
        Ok(())
    }

    /// Score a complete session.
    pub fn finalize(&self) -> Result<InterviewOutcome, SessionError> {
        if !self.is_complete() {
            return Err(SessionError::Incomplete {
                answered: self.answers.len(),
                total: self.question_count(),
            });
        }
        let breakdown =
            ScoreBreakdown::compute(&self.answers, self.config.difficulty, self.elapsed_secs)?;
        Ok(InterviewOutcome {
            score: breakdown.score,
            grade: classify(breakdown.score),
            breakdown,
        })
    }

    pub fn snapshot(&self) -> SavedProgress {
        SavedProgress {
            config: self.config.clone(),
            questions: self.questions.clone(),
            current_question: self.current_index(),
            answers: self.answers.clone(),
            feedback: self.feedback.clone(),
            elapsed_secs: self.elapsed_secs,
            last_updated: Utc::now(),
        }
    }

    /// Rebuild a session from saved progress.
    ///
    /// Feedback lists shorter than the answer list are padded with empty
    /// entries so every answer keeps its position.
    pub fn restore(progress: SavedProgress) -> Result<Self, SessionError> {
        let mut session = Self::new(progress.config, progress.questions)?;
        if progress.answers.len() > session.question_count() {
            return Err(SessionError::AlreadyComplete(progress.answers.len()));
        }
        let mut feedback = progress.feedback;
        feedback.resize(progress.answers.len(), Vec::new());
        session.answers = progress.answers;
        session.feedback = feedback;
        session.elapsed_secs = progress.elapsed_secs;
        Ok(session)
    }
}
