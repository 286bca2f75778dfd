//! Confidence scoring for the selected size.
//!
//! `confidence = round(max(0, 100 - penalty * CONFIDENCE_DECAY))`.
//! The band thresholds are part of the public contract: callers label and
//! colour results with [`ConfidenceBand`] rather than re-deriving them.

use serde::{Deserialize, Serialize};

use super::matcher::SizeDeviation;

/// Confidence points lost per unit of weighted penalty.
pub const CONFIDENCE_DECAY: f64 = 8.0;
/// Score at or above which confidence is "high".
pub const HIGH_CONFIDENCE_MIN: u8 = 80;
/// Score at or above which confidence is "medium" (below high).
pub const MEDIUM_CONFIDENCE_MIN: u8 = 60;

/// Qualitative confidence band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn from_score(score: u8) -> Self {
        if score >= HIGH_CONFIDENCE_MIN {
            Self::High
        } else if score >= MEDIUM_CONFIDENCE_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Convert a weighted penalty into a 0-100 confidence score.
pub fn confidence_from_penalty(penalty: f64) -> u8 {
    if !penalty.is_finite() {
        return 0;
    }
    let raw = (100.0 - penalty.max(0.0) * CONFIDENCE_DECAY).max(0.0);
    raw.round().min(100.0) as u8
}

/// Score the winning size's deviation profile.
///
/// An unscored profile (no comparable dimension) yields zero confidence.
pub fn score(deviation: &SizeDeviation) -> (u8, ConfidenceBand) {
    let confidence = deviation.score.map_or(0, confidence_from_penalty);
    (confidence, ConfidenceBand::from_score(confidence))
}
