//! Brand size-chart models and DTOs.

use std::collections::BTreeMap;

use fitengine_core::error::CoreError;
use fitengine_core::fit::size_chart::SizeChartRow;
use fitengine_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `size_charts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SizeChart {
    pub id: DbId,
    pub tenant_id: DbId,
    pub category: String,
    pub size_code: String,
    pub measurements: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing one size of a brand chart.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSizeChart {
    pub tenant_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    #[validate(length(min = 1, max = 20))]
    pub size_code: String,
    /// Range bounds such as `chest_min` / `chest_max`, in cm.
    pub measurements: BTreeMap<String, f64>,
}

impl SizeChart {
    pub fn to_row(&self) -> Result<SizeChartRow, CoreError> {
        let measurements = serde_json::from_value(self.measurements.clone()).map_err(|e| {
            CoreError::Internal(format!("Malformed size chart {}: {e}", self.id))
        })?;
        Ok(SizeChartRow {
            size_code: self.size_code.clone(),
            measurements,
        })
    }
}
