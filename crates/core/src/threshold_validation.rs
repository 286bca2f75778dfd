//! Shared range validation helpers.
//!
//! Provides reusable range-checking functions used by ingest validation for
//! garment measurements, size charts, and fabric compositions.

use crate::error::CoreError;

/// Tolerance (percentage points) allowed when a fabric composition is
/// checked against 100%.
pub const COMPOSITION_TOLERANCE: f64 = 1.0;

/// Validate that a value is finite and falls within `[min, max]`.
///
/// Returns a `CoreError::Validation` naming the field if out of range.
pub fn validate_range(value: f64, min: f64, max: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < min || value > max {
        return Err(CoreError::Validation(format!(
            "{name} must be between {min} and {max}, got {value}"
        )));
    }
    Ok(())
}

/// Validate that a value is finite and strictly positive.
pub fn validate_positive(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a positive number, got {value}"
        )));
    }
    Ok(())
}

/// Validate that percentages sum to 100 within [`COMPOSITION_TOLERANCE`].
pub fn validate_percentage_total<'a, I>(values: I, name: &str) -> Result<(), CoreError>
where
    I: IntoIterator<Item = &'a f64>,
{
    let mut total = 0.0;
    for value in values {
        if !value.is_finite() || *value < 0.0 {
            return Err(CoreError::Validation(format!(
                "{name} percentages must be non-negative numbers, got {value}"
            )));
        }
        total += value;
    }
    if (total - 100.0).abs() > COMPOSITION_TOLERANCE {
        return Err(CoreError::Validation(format!(
            "{name} must sum to 100%, got {total}%"
        )));
    }
    Ok(())
}

/// Validate that a collection is non-empty.
pub fn validate_non_empty(count: usize, name: &str) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(format!(
            "At least one {name} is required"
        )));
    }
    Ok(())
}
