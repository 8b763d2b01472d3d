//! Aggregate statistics over a user's interview history.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grade::Grade;
use crate::model::HistoryEntry;

/// Scores within this many points of the earlier average count as stable.
const TREND_BAND: f64 = 5.0;

/// Direction of the newest attempt relative to the earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Stable,
    Declining,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Improving => write!(f, "improving"),
            Trend::Stable => write!(f, "stable"),
            Trend::Declining => write!(f, "declining"),
        }
    }
}

/// Summary of a history list (newest entry first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryStats {
    pub attempts: usize,
    pub average_score: f64,
    pub best_score: u32,
    pub latest_score: u32,
    pub grades: BTreeMap<Grade, usize>,
    /// `None` with fewer than two attempts.
    pub trend: Option<Trend>,
}

impl HistoryStats {
    /// Returns `None` for an empty history.
    pub fn from_entries(entries: &[HistoryEntry]) -> Option<Self> {
        let latest = entries.first()?;
        let n = entries.len();
        let total: u64 = entries.iter().map(|e| e.score as u64).sum();
        let best = entries.iter().map(|e| e.score).max().unwrap_or(0);

        let mut grades = BTreeMap::new();
        for entry in entries {
            *grades.entry(entry.grade).or_insert(0) += 1;
        }

        let trend = if n < 2 {
            None
        } else {
            let earlier = &entries[1..];
            let earlier_avg =
                earlier.iter().map(|e| e.score as f64).sum::<f64>() / earlier.len() as f64;
            let delta = latest.score as f64 - earlier_avg;
            Some(if delta > TREND_BAND {
                Trend::Improving
            } else if delta < -TREND_BAND {
                Trend::Declining
            } else {
                Trend::Stable
            })
        };

        Some(Self {
            attempts: n,
            average_score: total as f64 / n as f64,
            best_score: best,
            latest_score: latest.score,
            grades,
            trend,
        })
    }
}
