//! Size recommendation and body analysis handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use fitengine_core::catalog::RawSizeTable;
use fitengine_core::error::CoreError;
use fitengine_core::fit::body::{self, BodyShape};
use fitengine_core::fit::ease::{lenient_fit_type, FabricComposition, FitType};
use fitengine_core::fit::measurements::{GarmentKey, GarmentMeasurements, GarmentSizeEntry};
use fitengine_core::fit::size_chart::{self, SizeChartRow};
use fitengine_core::fit::{self as engine, ProductSizing, RecommendationResult, UserMeasurementInput};
use fitengine_core::types::DbId;
use fitengine_db::repositories::{ProductRepo, SizeChartRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Chest widths used by quick-recommend when the caller sends no sizes.
const DEFAULT_QUICK_SIZES: [(&str, f64); 4] = [("S", 104.0), ("M", 110.0), ("L", 116.0), ("XL", 122.0)];

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub product_id: DbId,
    #[serde(flatten)]
    pub user: UserMeasurementInput,
}

#[derive(Debug, Deserialize)]
pub struct QuickRecommendRequest {
    #[serde(flatten)]
    pub user: UserMeasurementInput,
    /// Unrecognised values fall back to the regular fit tier.
    #[serde(default, deserialize_with = "lenient_fit_type")]
    pub fit_type: Option<FitType>,
    pub fabric_composition: Option<FabricComposition>,
    /// Size code to raw `key -> cm` measurements.
    #[serde(default)]
    pub sizes: RawSizeTable,
}

#[derive(Debug, Serialize)]
pub struct QuickRecommendResponse {
    #[serde(flatten)]
    pub result: RecommendationResult,
    /// `size.key` entries that were not recognised and did not take part.
    pub ignored_keys: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct BodyAnalysisRequest {
    #[serde(alias = "user_height")]
    pub height_cm: f64,
    #[serde(alias = "user_weight")]
    pub weight_kg: f64,
    #[serde(default)]
    pub body_shape: BodyShape,
}

// ---------------------------------------------------------------------------
// POST /recommend
// ---------------------------------------------------------------------------

/// Recommend a size for a stored product.
///
/// When the product has no measurements of its own, the tenant's size chart
/// for the product's category is used instead.
pub async fn recommend(
    State(state): State<AppState>,
    Json(input): Json<RecommendRequest>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_active(&state.pool, input.product_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        }))?;

    let mut sizing = product.sizing()?;
    if sizing.sizes.is_empty() {
        if let Some(category) = product.category.as_deref() {
            let chart = SizeChartRepo::list_for_category(&state.pool, product.tenant_id, category).await?;
            let rows = chart
                .iter()
                .map(|row| row.to_row())
                .collect::<Result<Vec<SizeChartRow>, CoreError>>()?;
            tracing::debug!(
                product_id = product.id,
                category,
                rows = rows.len(),
                "Product has no sizes, loading size chart",
            );
            sizing.fallback_chart = Some(size_chart::summarize_chart(&rows)?);
        }
    }

    let result = engine::recommend(&input.user, &sizing)?;
    tracing::info!(
        product_id = product.id,
        recommended_size = %result.recommended_size,
        confidence_score = result.confidence_score,
        alternative_size = ?result.alternative_size,
        used_fallback_chart = result.used_fallback_chart,
        "Size recommended",
    );
    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// POST /quick-recommend
// ---------------------------------------------------------------------------

/// Recommend from an inline size table, or a default S-XL chest table.
pub async fn quick_recommend(Json(input): Json<QuickRecommendRequest>) -> AppResult<impl IntoResponse> {
    let (sizes, ignored_keys) = if input.sizes.is_empty() {
        (default_quick_sizes()?, Vec::new())
    } else {
        parse_inline_sizes(&input.sizes)?
    };

    if !ignored_keys.is_empty() {
        tracing::warn!(ignored = ?ignored_keys, "Ignoring unknown measurement keys");
    }

    let sizing = ProductSizing {
        fit_type: input.fit_type,
        fabric_composition: input.fabric_composition,
        sizes,
        fallback_chart: None,
    };
    let result = engine::recommend(&input.user, &sizing)?;
    tracing::info!(
        recommended_size = %result.recommended_size,
        confidence_score = result.confidence_score,
        "Quick size recommended",
    );

    Ok(Json(DataResponse {
        data: QuickRecommendResponse {
            result,
            ignored_keys,
        },
    }))
}

fn default_quick_sizes() -> Result<Vec<GarmentSizeEntry>, CoreError> {
    DEFAULT_QUICK_SIZES
        .iter()
        .map(|(code, chest)| {
            let measurements = GarmentMeasurements::from_pairs([(GarmentKey::ChestWidth, *chest)])?;
            Ok(GarmentSizeEntry::new(*code, measurements))
        })
        .collect()
}

fn parse_inline_sizes(raw: &RawSizeTable) -> Result<(Vec<GarmentSizeEntry>, Vec<String>), CoreError> {
    let mut sizes = Vec::with_capacity(raw.len());
    let mut ignored = Vec::new();
    for (code, values) in raw {
        let parsed = GarmentMeasurements::from_raw(values)?;
        ignored.extend(parsed.ignored_keys.into_iter().map(|key| format!("{code}.{key}")));
        sizes.push(GarmentSizeEntry::new(code.clone(), parsed.measurements));
    }
    Ok((sizes, ignored))
}

// ---------------------------------------------------------------------------
// POST /body-analysis
// ---------------------------------------------------------------------------

pub async fn body_analysis(Json(input): Json<BodyAnalysisRequest>) -> AppResult<impl IntoResponse> {
    let analysis = body::analyze(input.height_cm, input.weight_kg, input.body_shape);
    tracing::debug!(bmi = analysis.bmi, "Body analysed");
    Ok(Json(DataResponse { data: analysis }))
}
