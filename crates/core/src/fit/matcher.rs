//! Per-size deviation scoring and size selection.
//!
//! For each size, every dimension present in the body estimate, the ease
//! table, and the garment measurements contributes
//! `garment - (body + ease)`. The aggregate score is a weighted penalty:
//! looser-than-required deviations count at [`OVERSIZE_PENALTY`]x, tighter
//! ones at [`UNDERSIZE_PENALTY`]x. Weights of the dimensions actually present
//! are renormalized to sum to 1.

use std::collections::BTreeMap;

use serde::Serialize;

use super::body::EstimatedBody;
use super::ease::EaseTable;
use super::measurements::{BodyDimension, GarmentSizeEntry};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Scoring policy
// ---------------------------------------------------------------------------

/// Multiplier for deviations where the garment is looser than required.
pub const OVERSIZE_PENALTY: f64 = 1.0;
/// Multiplier for deviations where the garment is tighter than required.
pub const UNDERSIZE_PENALTY: f64 = 2.0;
/// An adjacent size is offered as an alternative when its score is within
/// this fraction of the winner's score.
pub const ALTERNATIVE_PROXIMITY: f64 = 0.15;
/// Scores closer than this are treated as tied.
pub const SCORE_TIE_EPSILON: f64 = 1e-9;

/// Relative importance of each dimension before renormalization.
///
/// | dimension | weight |
/// |-----------|--------|
/// | chest     | 0.5    |
/// | waist     | 0.3    |
/// | shoulder  | 0.2    |
/// | hip       | 0.2    |
pub fn dimension_weight(dim: BodyDimension) -> f64 {
    match dim {
        BodyDimension::Chest => 0.5,
        BodyDimension::Waist => 0.3,
        BodyDimension::Shoulder => 0.2,
        BodyDimension::Hip => 0.2,
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Deviation profile of one candidate size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeDeviation {
    /// `garment - (body + ease)` per contributing dimension, in cm.
    pub deviations: BTreeMap<BodyDimension, f64>,
    /// Weighted penalty score; lower is better. `None` when no dimension
    /// could be compared.
    pub score: Option<f64>,
    /// Weighted signed deviation; negative means the size runs small.
    pub signed_deviation: Option<f64>,
}

impl SizeDeviation {
    /// Compute the deviation profile of one size entry.
    pub fn compute(body: &EstimatedBody, ease: &EaseTable, entry: &GarmentSizeEntry) -> Self {
        let mut deviations = BTreeMap::new();
        let mut total_weight = 0.0;
        let mut weighted_penalty = 0.0;
        let mut weighted_signed = 0.0;

        for dim in BodyDimension::ALL {
            let (Some(body_cm), Some(ease_cm), Some(garment_cm)) = (
                body.get(dim),
                ease.get(dim),
                entry.measurements.for_dimension(dim),
            ) else {
                continue;
            };

            let deviation = garment_cm - (body_cm + ease_cm);
            let weight = dimension_weight(dim);
            total_weight += weight;
            weighted_penalty += weight * penalty(deviation);
            weighted_signed += weight * deviation;
            deviations.insert(dim, deviation);
        }

        if total_weight <= 0.0 {
            return Self {
                deviations,
                score: None,
                signed_deviation: None,
            };
        }

        Self {
            deviations,
            score: Some(weighted_penalty / total_weight),
            signed_deviation: Some(weighted_signed / total_weight),
        }
    }
}

/// Asymmetric penalty for a single dimension's deviation.
pub fn penalty(deviation: f64) -> f64 {
    if deviation < 0.0 {
        -deviation * UNDERSIZE_PENALTY
    } else {
        deviation * OVERSIZE_PENALTY
    }
}

/// One row of the per-size breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeScore {
    pub size_code: String,
    #[serde(flatten)]
    pub deviation: SizeDeviation,
}

/// Result of matching a body against a size table.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    /// Every size, in the input order.
    pub sizes: Vec<SizeScore>,
    /// Index of the winning size in [`MatchOutcome::sizes`].
    pub best_index: usize,
    /// Index of the adjacent alternative size, if it is close enough.
    pub alternative_index: Option<usize>,
}

impl MatchOutcome {
    pub fn best(&self) -> &SizeScore {
        &self.sizes[self.best_index]
    }

    pub fn alternative(&self) -> Option<&SizeScore> {
        self.alternative_index.map(|i| &self.sizes[i])
    }
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// Score every size entry and select the best and the alternative.
///
/// `entries` must be ordered by ascending nominal size. Ties go to the
/// larger size.
///
/// # Errors
///
/// - [`CoreError::NoSizeData`] when `entries` is empty.
/// - [`CoreError::MissingMeasurements`] when no entry has a dimension that
///   can be compared against the body estimate.
pub fn match_sizes(
    body: &EstimatedBody,
    ease: &EaseTable,
    entries: &[GarmentSizeEntry],
) -> Result<MatchOutcome, CoreError> {
    if entries.is_empty() {
        return Err(CoreError::NoSizeData);
    }

    let sizes: Vec<SizeScore> = entries
        .iter()
        .map(|entry| SizeScore {
            size_code: entry.size_code.clone(),
            deviation: SizeDeviation::compute(body, ease, entry),
        })
        .collect();

    let mut best: Option<(usize, f64)> = None;
    for (idx, size) in sizes.iter().enumerate() {
        let Some(score) = size.deviation.score else {
            continue;
        };
        match best {
            Some((_, best_score)) if score > best_score + SCORE_TIE_EPSILON => {}
            _ => best = Some((idx, score)),
        }
    }
    let Some((best_index, best_score)) = best else {
        return Err(CoreError::MissingMeasurements);
    };

    let alternative_index = select_alternative(&sizes, best_index, best_score);

    Ok(MatchOutcome {
        sizes,
        best_index,
        alternative_index,
    })
}

/// The adjacent size toward the opposite side of the winner's deviation,
/// if its score is within [`ALTERNATIVE_PROXIMITY`] of the winner's.
fn select_alternative(sizes: &[SizeScore], best_index: usize, best_score: f64) -> Option<usize> {
    let signed = sizes[best_index].deviation.signed_deviation.unwrap_or(0.0);
    // Runs small (or exact): look one size up. Runs large: one size down.
    let candidate = if signed <= 0.0 {
        best_index.checked_add(1).filter(|i| *i < sizes.len())
    } else {
        best_index.checked_sub(1)
    }?;

    let score = sizes[candidate].deviation.score?;
    let limit = best_score * (1.0 + ALTERNATIVE_PROXIMITY) + SCORE_TIE_EPSILON;
    (score <= limit).then_some(candidate)
}
