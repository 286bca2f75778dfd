//! Recommendation orchestration.
//!
//! Runs body estimation, ease resolution, size matching, and confidence
//! scoring for one request. Every call recomputes from its inputs; nothing
//! is cached between calls.

use serde::{Deserialize, Serialize};

use super::body::{self, BodyShape};
use super::confidence::{self, ConfidenceBand};
use super::description::{self, DimensionFit};
use super::ease::{self, FabricComposition, FitType, PreferredFit};
use super::matcher::{self, SizeScore};
use super::measurements::{sort_by_nominal_size, GarmentSizeEntry};
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The shopper's measurements for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMeasurementInput {
    #[serde(alias = "user_height")]
    pub height_cm: f64,
    #[serde(alias = "user_weight")]
    pub weight_kg: f64,
    #[serde(default)]
    pub body_shape: BodyShape,
    #[serde(default)]
    pub preferred_fit: Option<PreferredFit>,
    #[serde(default)]
    pub age: Option<u32>,
}

/// Everything the engine needs to know about a product.
///
/// `fit_type` and `fabric_composition` are optional in the catalog; missing
/// values default to [`FitType::RegularFit`] and no stretch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductSizing {
    pub fit_type: Option<FitType>,
    pub fabric_composition: Option<FabricComposition>,
    pub sizes: Vec<GarmentSizeEntry>,
    /// Brand size chart, already summarized to midpoints. Used only when
    /// `sizes` is empty.
    pub fallback_chart: Option<Vec<GarmentSizeEntry>>,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    pub recommended_size: String,
    pub confidence_score: u8,
    pub confidence_band: ConfidenceBand,
    pub alternative_size: Option<String>,
    pub fit_description: String,
    pub fit_description_tr: String,
    pub notes: Option<String>,
    /// Deviation profile of every candidate size, in nominal order.
    pub size_breakdown: Vec<SizeScore>,
    /// Per-dimension detail for the recommended size.
    pub fit_details: Vec<DimensionFit>,
    /// True when the brand size chart stood in for product measurements.
    pub used_fallback_chart: bool,
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// Recommend a size for `input` from `product`'s size table.
///
/// Height and weight outside their valid ranges are clamped, never rejected.
///
/// # Errors
///
/// - [`CoreError::NoSizeData`] when the product has no sizes and no
///   fallback chart (or an empty one).
/// - [`CoreError::MissingMeasurements`] when no size has a dimension that
///   can be compared against the body.
pub fn recommend(
    input: &UserMeasurementInput,
    product: &ProductSizing,
) -> Result<RecommendationResult, CoreError> {
    let (source, used_fallback_chart) = if !product.sizes.is_empty() {
        (&product.sizes, false)
    } else {
        match &product.fallback_chart {
            Some(chart) if !chart.is_empty() => (chart, true),
            _ => return Err(CoreError::NoSizeData),
        }
    };
    let mut entries = source.clone();
    sort_by_nominal_size(&mut entries);

    let fit_type = product.fit_type.unwrap_or_default();
    let no_fabric = FabricComposition::new();
    let fabric = product.fabric_composition.as_ref().unwrap_or(&no_fabric);

    let estimated = body::estimate_with_age(input.height_cm, input.weight_kg, input.body_shape, input.age);
    let ease_table = ease::resolve(fit_type, input.preferred_fit, fabric);
    let outcome = matcher::match_sizes(&estimated, &ease_table, &entries)?;

    let best = outcome.best();
    let (confidence_score, confidence_band) = confidence::score(&best.deviation);
    let fit_details = description::fit_details(&estimated, &ease_table, &entries[outcome.best_index]);
    let fit_description = description::describe(&fit_details);

    Ok(RecommendationResult {
        recommended_size: best.size_code.clone(),
        confidence_score,
        confidence_band,
        alternative_size: outcome.alternative().map(|s| s.size_code.clone()),
        fit_description: fit_description.english,
        fit_description_tr: fit_description.turkish,
        notes: fit_description.notes,
        size_breakdown: outcome.sizes,
        fit_details,
        used_fallback_chart,
    })
}
