//! Letter grades and the hire-chance estimate.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Coarse classification of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl Grade {
    /// Short label shown next to the score.
    pub fn label(self) -> &'static str {
        match self {
            Grade::A => "Excellent!",
            Grade::B => "Almost There!",
            Grade::C => "Get More Practice",
            Grade::F => "Fail - Needs Improvement",
        }
    }

    /// One-line encouragement shown on the results screen.
    pub fn summary(self) -> &'static str {
        match self {
            Grade::A => "Outstanding performance! You're well-prepared for this interview.",
            Grade::B => "Great job! You're almost there - just a few tweaks needed.",
            Grade::C => "Keep practicing! You're on the right track but need more preparation.",
            Grade::F => "Don't give up! Use this feedback to improve and try again.",
        }
    }

    pub fn all() -> [Grade; 4] {
        [Grade::A, Grade::B, Grade::C, Grade::F]
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// Map a score to its grade. Thresholds are checked highest first.
pub fn classify(score: u32) -> Grade {
    if score >= 90 {
        Grade::A
    } else if score >= 70 {
        Grade::B
    } else if score >= 50 {
        Grade::C
    } else {
        Grade::F
    }
}

/// Source of uniform random integers, injectable so callers can pin the
/// hire-chance estimate in tests.
pub trait RandomSource {
    /// Uniform integer in `0..bound`. `bound` is always non-zero.
    fn below(&mut self, bound: u32) -> u32;
}

/// [`RandomSource`] backed by the thread-local `rand` generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn below(&mut self, bound: u32) -> u32 {
        rand::thread_rng().gen_range(0..bound)
    }
}

/// Base percentage and random spread for a score's hire-chance band.
pub fn hire_chance_band(score: u32) -> (u32, u32) {
    if score >= 90 {
        (90, 10)
    } else if score >= 70 {
        (75, 15)
    } else if score >= 50 {
        (45, 25)
    } else {
        (15, 25)
    }
}

/// Decorative "estimated hire chance" percentage.
///
/// Not part of the grading contract: the value is random within the band
/// for the score, and two calls with the same score usually differ.
pub fn estimate_hire_chance(score: u32, rng: &mut dyn RandomSource) -> u32 {
    let (base, spread) = hire_chance_band(score);
    base + rng.below(spread)
}
