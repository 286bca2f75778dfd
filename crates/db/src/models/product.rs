//! Product catalog models and DTOs.

use std::collections::BTreeMap;

use fitengine_core::catalog::RawSizeTable;
use fitengine_core::error::CoreError;
use fitengine_core::fit::ease::{FabricComposition, FitType};
use fitengine_core::fit::measurements::{GarmentMeasurements, GarmentSizeEntry};
use fitengine_core::fit::ProductSizing;
use fitengine_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub tenant_id: DbId,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub fit_type: Option<String>,
    pub fabric_composition: Option<serde_json::Value>,
    pub measurements: serde_json::Value,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Listing projection with the number of sizes instead of the full table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductSummary {
    pub id: DbId,
    pub tenant_id: DbId,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub fit_type: Option<String>,
    pub sizes_count: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for ingesting a new product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProduct {
    pub tenant_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub sku: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub fit_type: Option<FitType>,
    pub fabric_composition: Option<FabricComposition>,
    pub measurements: RawSizeTable,
}

impl Product {
    /// Rebuild the engine's view of this product from its stored columns.
    ///
    /// Stored rows are validated at ingest, so an unrecognised fit type or
    /// measurement key here means the row was written by something else; such
    /// values are skipped with a warning rather than failing the request.
    pub fn sizing(&self) -> Result<ProductSizing, CoreError> {
        let fit_type = match self.fit_type.as_deref() {
            Some(raw) => {
                let parsed = FitType::parse(raw);
                if parsed.is_none() {
                    tracing::warn!(product_id = self.id, fit_type = raw, "Unknown fit type, using default");
                }
                parsed
            }
            None => None,
        };

        let fabric_composition = self
            .fabric_composition
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| serde_json::from_value::<FabricComposition>(v.clone()))
            .transpose()
            .map_err(|e| CoreError::Internal(format!("Malformed fabric composition on product {}: {e}", self.id)))?;

        let raw: RawSizeTable = serde_json::from_value(self.measurements.clone())
            .map_err(|e| CoreError::Internal(format!("Malformed measurements on product {}: {e}", self.id)))?;

        let mut sizes = Vec::with_capacity(raw.len());
        for (size_code, values) in &raw {
            let parsed = GarmentMeasurements::from_raw(values)?;
            if !parsed.ignored_keys.is_empty() {
                tracing::warn!(
                    product_id = self.id,
                    size_code = %size_code,
                    ignored = ?parsed.ignored_keys,
                    "Ignoring unknown measurement keys",
                );
            }
            sizes.push(GarmentSizeEntry::new(size_code.clone(), parsed.measurements));
        }

        Ok(ProductSizing {
            fit_type,
            fabric_composition,
            sizes,
            fallback_chart: None,
        })
    }
}

/// Convert a validated fabric map into its JSONB form.
pub fn fabric_to_json(fabric: &BTreeMap<String, f64>) -> serde_json::Value {
    serde_json::Value::Object(
        fabric
            .iter()
            .map(|(fiber, pct)| (fiber.clone(), serde_json::Value::from(*pct)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fitengine_core::fit::measurements::GarmentKey;
    use serde_json::json;

    fn product(fit_type: Option<&str>, fabric: Option<serde_json::Value>, measurements: serde_json::Value) -> Product {
        Product {
            id: 7,
            tenant_id: 1,
            sku: "TS-001".into(),
            name: "Basic Tee".into(),
            category: Some("t-shirt".into()),
            fit_type: fit_type.map(String::from),
            fabric_composition: fabric,
            measurements,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn sizing_parses_stored_columns() {
        let p = product(
            Some("slim_fit"),
            Some(json!({"cotton": 95.0, "elastane": 5.0})),
            json!({"M": {"chest_width": 110.0, "length": 74.0}, "S": {"chest_width": 104.0}}),
        );
        let sizing = p.sizing().unwrap();
        assert_eq!(sizing.fit_type, Some(FitType::SlimFit));
        assert_eq!(sizing.fabric_composition.unwrap().get("elastane"), Some(&5.0));
        assert_eq!(sizing.sizes.len(), 2);
        let m = sizing.sizes.iter().find(|s| s.size_code == "M").unwrap();
        assert_eq!(m.measurements.get(GarmentKey::ChestWidth), Some(110.0));
    }

    #[test]
    fn unknown_fit_type_and_keys_are_skipped() {
        let p = product(Some("baggy"), None, json!({"M": {"chest_width": 110.0, "collar": 40.0}}));
        let sizing = p.sizing().unwrap();
        assert_eq!(sizing.fit_type, None);
        assert_eq!(sizing.sizes[0].measurements.len(), 1);
    }

    #[test]
    fn empty_measurements_give_no_sizes() {
        let sizing = product(None, Some(serde_json::Value::Null), json!({})).sizing().unwrap();
        assert!(sizing.sizes.is_empty());
        assert!(sizing.fabric_composition.is_none());
    }

    #[test]
    fn malformed_measurements_are_internal_errors() {
        let p = product(None, None, json!({"M": "large"}));
        assert!(matches!(p.sizing(), Err(CoreError::Internal(_))));
    }

    #[test]
    fn create_product_length_rules() {
        let input: CreateProduct = serde_json::from_value(json!({
            "tenant_id": 1,
            "sku": "",
            "name": "Tee",
            "measurements": {"M": {"chest_width": 110.0}}
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sku"));
    }

    #[test]
    fn fabric_json_round_trip() {
        let fabric = BTreeMap::from([("cotton".to_string(), 100.0)]);
        assert_eq!(fabric_to_json(&fabric), json!({"cotton": 100.0}));
    }
}
