//! Body measurement estimation from height, weight, and body shape.
//!
//! Every dimension is computed as
//!
//! ```text
//! height_cm * BASE_RATIO * shape_multiplier * max(MIN_BMI_FACTOR, 1 + bmi_deviation * BMI_IMPACT)
//! bmi_deviation = (bmi - REFERENCE_BMI) / REFERENCE_BMI
//! ```
//!
//! Inputs are clamped into [`HEIGHT_RANGE_CM`] and [`WEIGHT_RANGE_KG`] before
//! estimation, so the estimator is total and never produces a non-positive
//! or non-finite value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::measurements::BodyDimension;

// ---------------------------------------------------------------------------
// Input ranges
// ---------------------------------------------------------------------------

/// Accepted height range in cm (inclusive). Values outside are clamped.
pub const HEIGHT_RANGE_CM: (f64, f64) = (140.0, 220.0);
/// Accepted weight range in kg (inclusive). Values outside are clamped.
pub const WEIGHT_RANGE_KG: (f64, f64) = (35.0, 180.0);

/// BMI treated as the population average; deviations are measured from it.
pub const REFERENCE_BMI: f64 = 22.5;
/// Lower bound on the BMI scaling factor.
pub const MIN_BMI_FACTOR: f64 = 0.5;

/// Age above which waist and hip grow slightly.
pub const AGE_ADJUSTMENT_START: u32 = 40;
/// Waist/hip growth per year above [`AGE_ADJUSTMENT_START`].
pub const AGE_ADJUSTMENT_PER_YEAR: f64 = 0.002;
/// Cap on the age growth factor.
pub const MAX_AGE_FACTOR: f64 = 1.05;

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Per-dimension coefficients: ratio of height and sensitivity to BMI.
#[derive(Debug, Clone, Copy)]
struct DimensionCoefficients {
    base_ratio: f64,
    bmi_impact: f64,
}

fn coefficients(dim: BodyDimension) -> DimensionCoefficients {
    match dim {
        BodyDimension::Chest => DimensionCoefficients { base_ratio: 0.52, bmi_impact: 0.8 },
        BodyDimension::Waist => DimensionCoefficients { base_ratio: 0.44, bmi_impact: 1.2 },
        BodyDimension::Hip => DimensionCoefficients { base_ratio: 0.53, bmi_impact: 0.9 },
        BodyDimension::Shoulder => DimensionCoefficients { base_ratio: 0.24, bmi_impact: 0.3 },
    }
}

/// Shape multipliers, `[chest, waist, hip, shoulder]`.
///
/// | shape     | chest | waist | hip  | shoulder |
/// |-----------|-------|-------|------|----------|
/// | average   | 1.00  | 1.00  | 1.00 | 1.00     |
/// | slim      | 0.92  | 0.88  | 0.94 | 0.95     |
/// | athletic  | 1.05  | 0.92  | 0.98 | 1.08     |
/// | heavy     | 1.08  | 1.12  | 1.06 | 1.05     |
/// | hourglass | 1.02  | 0.90  | 1.06 | 0.98     |
/// | pear      | 0.96  | 0.98  | 1.10 | 0.95     |
/// | rectangle | 0.98  | 1.04  | 0.98 | 1.00     |
fn shape_multipliers(shape: BodyShape) -> [f64; 4] {
    match shape {
        BodyShape::Average => [1.00, 1.00, 1.00, 1.00],
        BodyShape::Slim => [0.92, 0.88, 0.94, 0.95],
        BodyShape::Athletic => [1.05, 0.92, 0.98, 1.08],
        BodyShape::Heavy => [1.08, 1.12, 1.06, 1.05],
        BodyShape::Hourglass => [1.02, 0.90, 1.06, 0.98],
        BodyShape::Pear => [0.96, 0.98, 1.10, 0.95],
        BodyShape::Rectangle => [0.98, 1.04, 0.98, 1.00],
    }
}

fn multiplier(shape: BodyShape, dim: BodyDimension) -> f64 {
    let row = shape_multipliers(shape);
    match dim {
        BodyDimension::Chest => row[0],
        BodyDimension::Waist => row[1],
        BodyDimension::Hip => row[2],
        BodyDimension::Shoulder => row[3],
    }
}

// ---------------------------------------------------------------------------
// Body shape
// ---------------------------------------------------------------------------

/// Coarse wearer category used to distribute weight between dimensions.
///
/// Deserialization is lenient: null or unknown values become
/// [`BodyShape::Average`], and the legacy names `stocky` / `plus_size` map to [`BodyShape::Heavy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "Option<String>")]
pub enum BodyShape {
    Slim,
    #[default]
    Average,
    Athletic,
    Heavy,
    Hourglass,
    Pear,
    Rectangle,
}

impl BodyShape {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "slim" => Self::Slim,
            "athletic" => Self::Athletic,
            "heavy" | "stocky" | "plus_size" => Self::Heavy,
            "hourglass" => Self::Hourglass,
            "pear" => Self::Pear,
            "rectangle" => Self::Rectangle,
            _ => Self::Average,
        }
    }
}

impl From<Option<String>> for BodyShape {
    fn from(raw: Option<String>) -> Self {
        raw.as_deref().map_or(Self::Average, Self::parse)
    }
}

// ---------------------------------------------------------------------------
// Estimated body
// ---------------------------------------------------------------------------

/// Estimated body circumferences (chest, waist, hip) and shoulder width, in cm.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EstimatedBody(BTreeMap<BodyDimension, f64>);

impl EstimatedBody {
    pub fn get(&self, dim: BodyDimension) -> Option<f64> {
        self.0.get(&dim).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyDimension, f64)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

/// Clamp a value into `range`; NaN clamps to the lower bound.
fn clamp_input(value: f64, range: (f64, f64)) -> f64 {
    if value.is_nan() {
        return range.0;
    }
    value.clamp(range.0, range.1)
}

/// Clamp height into [`HEIGHT_RANGE_CM`].
pub fn clamp_height(height_cm: f64) -> f64 {
    clamp_input(height_cm, HEIGHT_RANGE_CM)
}

/// Clamp weight into [`WEIGHT_RANGE_KG`].
pub fn clamp_weight(weight_kg: f64) -> f64 {
    clamp_input(weight_kg, WEIGHT_RANGE_KG)
}

/// Body-mass index from height (cm) and weight (kg). Inputs are not clamped.
pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Estimate body measurements. Height and weight are clamped first.
pub fn estimate(height_cm: f64, weight_kg: f64, shape: BodyShape) -> EstimatedBody {
    estimate_with_age(height_cm, weight_kg, shape, None)
}

/// Estimate body measurements with an optional age adjustment.
///
/// Above [`AGE_ADJUSTMENT_START`] years, waist and hip grow by
/// [`AGE_ADJUSTMENT_PER_YEAR`] per year, capped at [`MAX_AGE_FACTOR`].
pub fn estimate_with_age(
    height_cm: f64,
    weight_kg: f64,
    shape: BodyShape,
    age: Option<u32>,
) -> EstimatedBody {
    let height = clamp_height(height_cm);
    let weight = clamp_weight(weight_kg);
    let bmi_deviation = (calculate_bmi(height, weight) - REFERENCE_BMI) / REFERENCE_BMI;
    let age_factor = age_factor(age);

    let values = BodyDimension::ALL
        .iter()
        .map(|&dim| {
            let c = coefficients(dim);
            let bmi_factor = (1.0 + bmi_deviation * c.bmi_impact).max(MIN_BMI_FACTOR);
            let mut value = height * c.base_ratio * multiplier(shape, dim) * bmi_factor;
            if matches!(dim, BodyDimension::Waist | BodyDimension::Hip) {
                value *= age_factor;
            }
            (dim, value)
        })
        .collect();

    EstimatedBody(values)
}

fn age_factor(age: Option<u32>) -> f64 {
    match age {
        Some(a) if a > AGE_ADJUSTMENT_START => {
            let years = f64::from(a - AGE_ADJUSTMENT_START);
            (1.0 + years * AGE_ADJUSTMENT_PER_YEAR).min(MAX_AGE_FACTOR)
        }
        _ => 1.0,
    }
}

// ---------------------------------------------------------------------------
// Body analysis
// ---------------------------------------------------------------------------

/// WHO adult BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 25.0 {
            Self::Normal
        } else if bmi < 30.0 {
            Self::Overweight
        } else {
            Self::Obese
        }
    }
}

/// BMI, category, estimated measurements, and body proportions.
#[derive(Debug, Clone, Serialize)]
pub struct BodyAnalysis {
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub measurements: EstimatedBody,
    pub waist_to_hip_ratio: f64,
    pub chest_to_waist_ratio: f64,
}

/// Analyse a body from (clamped) height and weight.
pub fn analyze(height_cm: f64, weight_kg: f64, shape: BodyShape) -> BodyAnalysis {
    let bmi = calculate_bmi(clamp_height(height_cm), clamp_weight(weight_kg));
    let measurements = estimate(height_cm, weight_kg, shape);

    // All four dimensions are always present and positive.
    let chest = measurements.get(BodyDimension::Chest).unwrap_or(1.0);
    let waist = measurements.get(BodyDimension::Waist).unwrap_or(1.0);
    let hip = measurements.get(BodyDimension::Hip).unwrap_or(1.0);

    BodyAnalysis {
        bmi: round_to(bmi, 1),
        bmi_category: BmiCategory::from_bmi(bmi),
        measurements,
        waist_to_hip_ratio: round_to(waist / hip, 2),
        chest_to_waist_ratio: round_to(chest / waist, 2),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
