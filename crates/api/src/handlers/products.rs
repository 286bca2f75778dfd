//! Handlers for product catalog ingest and lookup.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fitengine_core::catalog::{self, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use fitengine_core::error::CoreError;
use fitengine_core::types::DbId;
use fitengine_db::models::product::{CreateProduct, Product};
use fitengine_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::query::TenantPagination;
use crate::response::DataResponse;
use crate::state::AppState;

/// Verify that a product exists, returning the full row.
async fn ensure_product_exists(pool: &sqlx::PgPool, id: DbId) -> AppResult<Product> {
    ProductRepo::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::Core(CoreError::NotFound {
            entity: "Product",
            id,
        })
    })
}

// ---------------------------------------------------------------------------
// POST /products
// ---------------------------------------------------------------------------

/// Ingest a product with its size table.
///
/// Measurement keys are canonicalised before storage; unknown keys are
/// dropped and returned as `ignored_keys` so the feed can be fixed.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    if let Some(fabric) = &input.fabric_composition {
        catalog::validate_fabric_composition(fabric)?;
    }
    let table = catalog::validate_size_table(&input.measurements)?;

    if !table.ignored_keys.is_empty() {
        tracing::warn!(
            sku = %input.sku,
            ignored = ?table.ignored_keys,
            "Ignoring unknown measurement keys",
        );
    }

    let measurements = table.to_json()?;
    let created = ProductRepo::create(&state.pool, &input, &measurements).await?;
    tracing::info!(
        product_id = created.id,
        tenant_id = created.tenant_id,
        sku = %created.sku,
        sizes = table.entries.len(),
        "Product created",
    );

    let ignored_keys: Vec<String> = table
        .ignored_keys
        .iter()
        .map(|(size, key)| format!("{size}.{key}"))
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: serde_json::json!({
                "product": created,
                "ignored_keys": ignored_keys,
            }),
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /products
// ---------------------------------------------------------------------------

pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<TenantPagination>,
) -> AppResult<impl IntoResponse> {
    let limit = catalog::clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = catalog::clamp_offset(params.offset);
    let items = ProductRepo::list_by_tenant(&state.pool, params.tenant_id, limit, offset).await?;
    tracing::debug!(tenant_id = params.tenant_id, count = items.len(), "Listed products");
    Ok(Json(DataResponse { data: items }))
}

// ---------------------------------------------------------------------------
// GET /products/{id}
// ---------------------------------------------------------------------------

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ensure_product_exists(&state.pool, id).await?;
    Ok(Json(DataResponse { data: product }))
}
