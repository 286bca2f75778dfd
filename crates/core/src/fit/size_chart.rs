//! Brand size charts used as a fallback size table.
//!
//! Chart rows carry ranges (`chest_min` / `chest_max`) rather than single
//! values. Each range is summarized to its midpoint so the chart can be
//! matched exactly like a product's own size entries.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::measurements::{sort_by_nominal_size, GarmentMeasurements, GarmentSizeEntry, ParsedMeasurements};
use crate::error::CoreError;

const MIN_SUFFIX: &str = "_min";
const MAX_SUFFIX: &str = "_max";

/// One size row of a brand chart: size code to raw range measurements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeChartRow {
    pub size_code: String,
    pub measurements: BTreeMap<String, f64>,
}

#[derive(Default)]
struct Bounds {
    min: Option<f64>,
    max: Option<f64>,
    exact: Option<f64>,
}

/// Collapse `<key>_min` / `<key>_max` pairs into midpoints.
///
/// A key with only one bound uses that bound; plain keys pass through.
/// Unknown base keys are reported in [`ParsedMeasurements::ignored_keys`].
pub fn midpoint_measurements(raw: &BTreeMap<String, f64>) -> Result<ParsedMeasurements, CoreError> {
    let mut grouped: BTreeMap<String, Bounds> = BTreeMap::new();

    for (key, value) in raw {
        let lower = key.trim().to_ascii_lowercase();
        if let Some(base) = lower.strip_suffix(MIN_SUFFIX) {
            grouped.entry(base.to_string()).or_default().min = Some(*value);
        } else if let Some(base) = lower.strip_suffix(MAX_SUFFIX) {
            grouped.entry(base.to_string()).or_default().max = Some(*value);
        } else {
            grouped.entry(lower).or_default().exact = Some(*value);
        }
    }

    let mut summarized = BTreeMap::new();
    for (base, bounds) in grouped {
        let value = match (bounds.min, bounds.max, bounds.exact) {
            (Some(min), Some(max), _) => {
                if min > max {
                    return Err(CoreError::Validation(format!(
                        "{base}_min ({min}) must not exceed {base}_max ({max})"
                    )));
                }
                (min + max) / 2.0
            }
            (Some(bound), None, _) | (None, Some(bound), _) => bound,
            (None, None, Some(exact)) => exact,
            (None, None, None) => continue,
        };
        summarized.insert(base, value);
    }

    GarmentMeasurements::from_raw(&summarized)
}

/// Convert chart rows into size entries ordered by nominal size.
pub fn summarize_chart(rows: &[SizeChartRow]) -> Result<Vec<GarmentSizeEntry>, CoreError> {
    let mut entries = rows
        .iter()
        .map(|row| {
            let parsed = midpoint_measurements(&row.measurements)?;
            Ok(GarmentSizeEntry::new(row.size_code.clone(), parsed.measurements))
        })
        .collect::<Result<Vec<_>, CoreError>>()?;
    sort_by_nominal_size(&mut entries);
    Ok(entries)
}
