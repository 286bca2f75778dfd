//! Product catalog ingest rules and listing helpers.
//!
//! Raw product size tables are validated here before they are stored, so
//! persisted measurement maps only ever carry canonical garment keys.

use std::collections::BTreeMap;

use crate::error::CoreError;
use crate::fit::ease::FabricComposition;
use crate::fit::measurements::{sort_by_nominal_size, GarmentMeasurements, GarmentSizeEntry};
use crate::threshold_validation::{validate_non_empty, validate_percentage_total};

/// Default page size for product listings.
pub const DEFAULT_LIST_LIMIT: i64 = 50;
/// Maximum page size for product listings.
pub const MAX_LIST_LIMIT: i64 = 200;

/// A raw size table: size code to raw `key -> cm` measurements.
pub type RawSizeTable = BTreeMap<String, BTreeMap<String, f64>>;

/// A validated size table plus the keys that were dropped while parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSizeTable {
    /// Entries in ascending nominal size order.
    pub entries: Vec<GarmentSizeEntry>,
    /// `(size_code, raw_key)` pairs that were not recognised.
    pub ignored_keys: Vec<(String, String)>,
}

impl ValidatedSizeTable {
    /// Canonical JSON form for storage: `{ size_code: { key: cm } }`.
    pub fn to_json(&self) -> Result<serde_json::Value, CoreError> {
        let map: BTreeMap<&str, &GarmentMeasurements> = self
            .entries
            .iter()
            .map(|e| (e.size_code.as_str(), &e.measurements))
            .collect();
        serde_json::to_value(map)
            .map_err(|e| CoreError::Internal(format!("Failed to encode size table: {e}")))
    }
}

/// Validate a product's raw size table for ingest.
///
/// Requires at least one size, a non-blank code per size, positive values
/// within each key's plausible range, and at least one measurement per size
/// that can be compared against a body dimension.
pub fn validate_size_table(raw: &RawSizeTable) -> Result<ValidatedSizeTable, CoreError> {
    validate_non_empty(raw.len(), "size measurement")?;

    let mut entries = Vec::with_capacity(raw.len());
    let mut ignored_keys = Vec::new();

    for (size_code, measurements) in raw {
        let code = size_code.trim();
        if code.is_empty() {
            return Err(CoreError::Validation("Size codes must not be blank".into()));
        }

        let parsed = GarmentMeasurements::from_raw(measurements)?;
        parsed.measurements.validate_plausible()?;
        if !parsed.measurements.has_scorable_dimension() {
            return Err(CoreError::Validation(format!(
                "Size {code} needs at least one of chest_width, waist_width, hip_width, shoulder_width"
            )));
        }

        ignored_keys.extend(
            parsed
                .ignored_keys
                .into_iter()
                .map(|key| (code.to_string(), key)),
        );
        entries.push(GarmentSizeEntry::new(code, parsed.measurements));
    }

    sort_by_nominal_size(&mut entries);
    Ok(ValidatedSizeTable {
        entries,
        ignored_keys,
    })
}

/// Validate that a fabric composition sums to 100%.
pub fn validate_fabric_composition(fabric: &FabricComposition) -> Result<(), CoreError> {
    validate_percentage_total(fabric.values(), "Fabric composition")
}

/// Clamp a user-provided page size into `[1, max]`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
