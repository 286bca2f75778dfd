//! Handlers for brand size charts.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fitengine_core::error::CoreError;
use fitengine_core::fit::measurements::compare_size_codes;
use fitengine_core::fit::size_chart;
use fitengine_db::models::size_chart::UpsertSizeChart;
use fitengine_db::repositories::SizeChartRepo;

use crate::error::{AppError, AppResult};
use crate::query::SizeChartParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Create or replace one size of a tenant's chart for a category.
///
/// Range bounds are stored as given; they are collapsed to midpoints when
/// the chart is used for a recommendation.
pub async fn upsert_size_chart(
    State(state): State<AppState>,
    Json(input): Json<UpsertSizeChart>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let parsed = size_chart::midpoint_measurements(&input.measurements)?;
    parsed.measurements.validate_plausible()?;
    if !parsed.measurements.has_scorable_dimension() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Size chart row {} needs a chest, waist, hip or shoulder range",
            input.size_code
        ))));
    }
    if !parsed.ignored_keys.is_empty() {
        tracing::warn!(
            category = %input.category,
            size_code = %input.size_code,
            ignored = ?parsed.ignored_keys,
            "Ignoring unknown size chart keys",
        );
    }

    let measurements = serde_json::to_value(&input.measurements)
        .map_err(|e| AppError::InternalError(e.to_string()))?;
    let row = SizeChartRepo::upsert(&state.pool, &input, &measurements).await?;
    tracing::info!(
        tenant_id = row.tenant_id,
        category = %row.category,
        size_code = %row.size_code,
        "Size chart row saved",
    );
    Ok(Json(DataResponse { data: row }))
}

pub async fn list_size_chart(
    State(state): State<AppState>,
    Query(params): Query<SizeChartParams>,
) -> AppResult<impl IntoResponse> {
    let mut rows =
        SizeChartRepo::list_for_category(&state.pool, params.tenant_id, &params.category).await?;
    rows.sort_by(|a, b| compare_size_codes(&a.size_code, &b.size_code));
    Ok(Json(DataResponse { data: rows }))
}
