//! mockview-core: scoring engine, interview model, and coaching logic.
//!
//! This crate defines the data model, the deterministic answer-scoring
//! engine, and the coaching layer that asks a language model for questions
//! and feedback. Everything else in mockview builds on it.

pub mod coach;
pub mod error;
pub mod feedback;
pub mod grade;
pub mod model;
pub mod prompts;
pub mod questions;
pub mod report;
pub mod scoring;
pub mod session;
pub mod statistics;
pub mod traits;

pub use error::{ProviderError, ScoringError, SessionError};
pub use grade::{classify, estimate_hire_chance, Grade, RandomSource, ThreadRandom};
pub use scoring::{compute_score, ScoreBreakdown};
