//! Validated garment measurement types and nominal size ordering.
//!
//! Raw product measurement maps arrive with arbitrary keys. They are parsed
//! once, at the boundary, into [`GarmentMeasurements`] keyed by the closed
//! [`GarmentKey`] set; unknown keys are dropped and reported back to the
//! caller so they can be logged or surfaced.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::threshold_validation::{validate_positive, validate_range};

// ---------------------------------------------------------------------------
// Body dimensions
// ---------------------------------------------------------------------------

/// A body dimension the engine estimates and scores against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyDimension {
    Chest,
    Waist,
    Hip,
    Shoulder,
}

impl BodyDimension {
    /// Every dimension, in estimation order.
    pub const ALL: [BodyDimension; 4] = [Self::Chest, Self::Waist, Self::Hip, Self::Shoulder];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Waist => "waist",
            Self::Hip => "hip",
            Self::Shoulder => "shoulder",
        }
    }
}

// ---------------------------------------------------------------------------
// Garment keys
// ---------------------------------------------------------------------------

/// A recognised garment measurement key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GarmentKey {
    ChestWidth,
    WaistWidth,
    HipWidth,
    ShoulderWidth,
    Length,
    SleeveLength,
}

impl GarmentKey {
    /// Parse a raw key, accepting the short aliases used by older feeds
    /// (`chest`, `waist`, `hip`, `shoulder`). Case-insensitive.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "chest_width" | "chest" => Some(Self::ChestWidth),
            "waist_width" | "waist" => Some(Self::WaistWidth),
            "hip_width" | "hip" => Some(Self::HipWidth),
            "shoulder_width" | "shoulder" => Some(Self::ShoulderWidth),
            "length" => Some(Self::Length),
            "sleeve_length" => Some(Self::SleeveLength),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ChestWidth => "chest_width",
            Self::WaistWidth => "waist_width",
            Self::HipWidth => "hip_width",
            Self::ShoulderWidth => "shoulder_width",
            Self::Length => "length",
            Self::SleeveLength => "sleeve_length",
        }
    }

    /// The body dimension this garment measurement is compared against.
    ///
    /// Length measurements have no body counterpart and never contribute
    /// to scoring.
    pub fn body_dimension(self) -> Option<BodyDimension> {
        match self {
            Self::ChestWidth => Some(BodyDimension::Chest),
            Self::WaistWidth => Some(BodyDimension::Waist),
            Self::HipWidth => Some(BodyDimension::Hip),
            Self::ShoulderWidth => Some(BodyDimension::Shoulder),
            Self::Length | Self::SleeveLength => None,
        }
    }

    /// Plausible ingest range in cm, `(min, max)`.
    pub fn plausible_range(self) -> (f64, f64) {
        match self {
            Self::ChestWidth => (30.0, 200.0),
            Self::Length => (30.0, 150.0),
            Self::WaistWidth => (30.0, 180.0),
            Self::HipWidth => (30.0, 200.0),
            Self::SleeveLength => (20.0, 100.0),
            Self::ShoulderWidth => (20.0, 80.0),
        }
    }

    fn for_dimension(dim: BodyDimension) -> Self {
        match dim {
            BodyDimension::Chest => Self::ChestWidth,
            BodyDimension::Waist => Self::WaistWidth,
            BodyDimension::Hip => Self::HipWidth,
            BodyDimension::Shoulder => Self::ShoulderWidth,
        }
    }
}

// ---------------------------------------------------------------------------
// Garment measurements
// ---------------------------------------------------------------------------

/// Positive garment measurements in cm, keyed by [`GarmentKey`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GarmentMeasurements(BTreeMap<GarmentKey, f64>);

/// Result of parsing a raw measurement map.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedMeasurements {
    pub measurements: GarmentMeasurements,
    /// Raw keys that were not recognised and were dropped.
    pub ignored_keys: Vec<String>,
}

impl GarmentMeasurements {
    /// Parse a raw `key -> cm` map.
    ///
    /// Unknown keys are dropped and listed in
    /// [`ParsedMeasurements::ignored_keys`]. Recognised keys must carry a
    /// finite, positive value. When both a key and its alias are present
    /// (`chest` and `chest_width`) the canonical key wins.
    pub fn from_raw(raw: &BTreeMap<String, f64>) -> Result<ParsedMeasurements, CoreError> {
        let mut values = BTreeMap::new();
        let mut ignored_keys = Vec::new();

        for (raw_key, value) in raw {
            let Some(key) = GarmentKey::parse(raw_key) else {
                ignored_keys.push(raw_key.clone());
                continue;
            };
            validate_positive(*value, key.as_str())?;
            let canonical = raw_key.trim().eq_ignore_ascii_case(key.as_str());
            if canonical || !values.contains_key(&key) {
                values.insert(key, *value);
            }
        }

        Ok(ParsedMeasurements {
            measurements: Self(values),
            ignored_keys,
        })
    }

    /// Build from already-typed values. Non-positive or non-finite values
    /// are rejected.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (GarmentKey, f64)>,
    {
        let mut values = BTreeMap::new();
        for (key, value) in pairs {
            validate_positive(value, key.as_str())?;
            values.insert(key, value);
        }
        Ok(Self(values))
    }

    /// Check every value against its plausible ingest range.
    pub fn validate_plausible(&self) -> Result<(), CoreError> {
        for (key, value) in &self.0 {
            let (min, max) = key.plausible_range();
            validate_range(*value, min, max, key.as_str())?;
        }
        Ok(())
    }

    pub fn get(&self, key: GarmentKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// The garment value compared against a body dimension, if present.
    pub fn for_dimension(&self, dim: BodyDimension) -> Option<f64> {
        self.get(GarmentKey::for_dimension(dim))
    }

    /// True when at least one measurement maps to a body dimension.
    pub fn has_scorable_dimension(&self) -> bool {
        self.0.keys().any(|k| k.body_dimension().is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (GarmentKey, f64)> + '_ {
        self.0.iter().map(|(k, v)| (*k, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One size of a product with its measurements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarmentSizeEntry {
    pub size_code: String,
    pub measurements: GarmentMeasurements,
}

impl GarmentSizeEntry {
    pub fn new(size_code: impl Into<String>, measurements: GarmentMeasurements) -> Self {
        Self {
            size_code: size_code.into(),
            measurements,
        }
    }
}

// ---------------------------------------------------------------------------
// Nominal size ordering
// ---------------------------------------------------------------------------

/// Letter size codes in ascending order, with their accepted spellings.
const LETTER_SIZES: &[&[&str]] = &[
    &["XXS", "2XS"],
    &["XS"],
    &["S"],
    &["M"],
    &["L"],
    &["XL"],
    &["XXL", "2XL"],
    &["XXXL", "3XL"],
    &["4XL", "XXXXL"],
    &["5XL"],
];

/// Sort key for a size code: letter sizes first, then numeric sizes,
/// then anything unrecognised.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
enum NominalRank {
    Letter(usize),
    Numeric(f64),
    Unknown,
}

fn nominal_rank(code: &str) -> NominalRank {
    let normalized = code.trim().to_ascii_uppercase();
    if let Some(idx) = LETTER_SIZES
        .iter()
        .position(|spellings| spellings.contains(&normalized.as_str()))
    {
        return NominalRank::Letter(idx);
    }
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => NominalRank::Numeric(n),
        _ => NominalRank::Unknown,
    }
}

/// Compare two size codes by nominal size.
///
/// Unrecognised codes compare equal to each other so a stable sort keeps
/// their original relative order.
pub fn compare_size_codes(a: &str, b: &str) -> Ordering {
    nominal_rank(a)
        .partial_cmp(&nominal_rank(b))
        .unwrap_or(Ordering::Equal)
}

/// Stable-sort entries by ascending nominal size.
pub fn sort_by_nominal_size(entries: &mut [GarmentSizeEntry]) {
    entries.sort_by(|a, b| compare_size_codes(&a.size_code, &b.size_code));
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn raw(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    // -- GarmentKey::parse --

    #[test]
    fn parse_accepts_aliases_case_insensitively() {
        assert_eq!(GarmentKey::parse("Chest"), Some(GarmentKey::ChestWidth));
        assert_eq!(GarmentKey::parse("waist"), Some(GarmentKey::WaistWidth));
        assert_eq!(GarmentKey::parse("SHOULDER_WIDTH"), Some(GarmentKey::ShoulderWidth));
        assert_eq!(GarmentKey::parse("inseam"), None);
    }

    #[test]
    fn length_keys_have_no_body_dimension() {
        assert_eq!(GarmentKey::Length.body_dimension(), None);
        assert_eq!(GarmentKey::SleeveLength.body_dimension(), None);
        assert_eq!(
            GarmentKey::HipWidth.body_dimension(),
            Some(BodyDimension::Hip)
        );
    }

    // -- GarmentMeasurements::from_raw --

    #[test]
    fn from_raw_drops_and_reports_unknown_keys() {
        let parsed =
            GarmentMeasurements::from_raw(&raw(&[("chest_width", 104.0), ("collar", 40.0)]))
                .unwrap();
        assert_eq!(parsed.measurements.get(GarmentKey::ChestWidth), Some(104.0));
        assert_eq!(parsed.ignored_keys, vec!["collar".to_string()]);
        assert_eq!(parsed.measurements.len(), 1);
    }

    #[test]
    fn from_raw_prefers_canonical_key_over_alias() {
        let parsed =
            GarmentMeasurements::from_raw(&raw(&[("chest", 100.0), ("chest_width", 104.0)]))
                .unwrap();
        assert_eq!(parsed.measurements.get(GarmentKey::ChestWidth), Some(104.0));
    }

    #[test]
    fn from_raw_rejects_non_positive_values() {
        let result = GarmentMeasurements::from_raw(&raw(&[("chest_width", 0.0)]));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn for_dimension_maps_through_garment_key() {
        let m = GarmentMeasurements::from_pairs([(GarmentKey::WaistWidth, 90.0)]).unwrap();
        assert_eq!(m.for_dimension(BodyDimension::Waist), Some(90.0));
        assert_eq!(m.for_dimension(BodyDimension::Chest), None);
    }

    #[test]
    fn scorable_requires_a_body_dimension() {
        let only_length = GarmentMeasurements::from_pairs([(GarmentKey::Length, 72.0)]).unwrap();
        assert!(!only_length.has_scorable_dimension());

        let with_chest = GarmentMeasurements::from_pairs([
            (GarmentKey::Length, 72.0),
            (GarmentKey::ChestWidth, 104.0),
        ])
        .unwrap();
        assert!(with_chest.has_scorable_dimension());
    }

    #[test]
    fn plausible_range_rejects_implausible_shoulder() {
        let m = GarmentMeasurements::from_pairs([(GarmentKey::ShoulderWidth, 95.0)]).unwrap();
        assert_matches!(m.validate_plausible(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serializes_with_canonical_keys() {
        let m = GarmentMeasurements::from_pairs([(GarmentKey::ChestWidth, 104.0)]).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["chest_width"], 104.0);
    }

    // -- size ordering --

    #[test]
    fn letter_sizes_sort_ascending() {
        let mut entries: Vec<GarmentSizeEntry> = ["XL", "S", "2XL", "M", "xs", "L"]
            .iter()
            .map(|c| GarmentSizeEntry::new(*c, GarmentMeasurements::default()))
            .collect();
        sort_by_nominal_size(&mut entries);
        let codes: Vec<&str> = entries.iter().map(|e| e.size_code.as_str()).collect();
        assert_eq!(codes, vec!["xs", "S", "M", "L", "XL", "2XL"]);
    }

    #[test]
    fn numeric_sizes_sort_numerically_after_letters() {
        let mut entries: Vec<GarmentSizeEntry> = ["42", "M", "38", "40"]
            .iter()
            .map(|c| GarmentSizeEntry::new(*c, GarmentMeasurements::default()))
            .collect();
        sort_by_nominal_size(&mut entries);
        let codes: Vec<&str> = entries.iter().map(|e| e.size_code.as_str()).collect();
        assert_eq!(codes, vec!["M", "38", "40", "42"]);
    }

    #[test]
    fn unknown_codes_keep_relative_order_at_end() {
        let mut entries: Vec<GarmentSizeEntry> = ["ONE", "S", "TWO"]
            .iter()
            .map(|c| GarmentSizeEntry::new(*c, GarmentMeasurements::default()))
            .collect();
        sort_by_nominal_size(&mut entries);
        let codes: Vec<&str> = entries.iter().map(|e| e.size_code.as_str()).collect();
        assert_eq!(codes, vec!["S", "ONE", "TWO"]);
    }
}
