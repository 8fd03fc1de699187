//! Score Combiner: merges the two capped signals into a 0–100 total and a verdict.

use serde::{Deserialize, Serialize};

use crate::matching::hard_match::HARD_MATCH_WEIGHT;
use crate::matching::semantic::SEMANTIC_WEIGHT;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    High,
    Medium,
    Low,
}

impl Verdict {
    pub fn from_total(total: u32) -> Self {
        if total >= 80 {
            Verdict::High
        } else if total >= 50 {
            Verdict::Medium
        } else {
            Verdict::Low
        }
    }
}

/// `round(clamp(hard) + clamp(semantic))`. NaN addends count as 0.
pub fn combine(hard_score: f64, semantic_score: f64) -> (u32, Verdict) {
    let total = (cap(hard_score, HARD_MATCH_WEIGHT) + cap(semantic_score, SEMANTIC_WEIGHT)).round();
    let total = total.clamp(0.0, 100.0) as u32;
    (total, Verdict::from_total(total))
}

fn cap(score: f64, max: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, max)
    }
}
