//! Repository for the `products` table.

use fitengine_core::types::DbId;
use sqlx::PgPool;

use crate::models::product::{fabric_to_json, CreateProduct, Product, ProductSummary};

const COLUMNS: &str = "id, tenant_id, sku, name, category, fit_type, \
     fabric_composition, measurements, is_active, created_at, updated_at";

/// Provides catalog operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// `measurements` is the canonical size table produced by ingest
    /// validation, not the raw request payload.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProduct,
        measurements: &serde_json::Value,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (tenant_id, sku, name, category, fit_type, fabric_composition, measurements) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(input.tenant_id)
            .bind(&input.sku)
            .bind(&input.name)
            .bind(&input.category)
            .bind(input.fit_type.map(|f| f.as_str()))
            .bind(input.fabric_composition.as_ref().map(fabric_to_json))
            .bind(measurements)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a product that is still offered. Deactivated products are
    /// treated as absent by the recommendation flow.
    pub async fn find_active(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1 AND is_active = true");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a tenant's products, newest first.
    pub async fn list_by_tenant(
        pool: &PgPool,
        tenant_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ProductSummary>, sqlx::Error> {
        sqlx::query_as::<_, ProductSummary>(
            "SELECT id, tenant_id, sku, name, category, fit_type, \
                    (SELECT COUNT(*) FROM jsonb_object_keys(measurements)) AS sizes_count, \
                    is_active, created_at \
             FROM products \
             WHERE tenant_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(tenant_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }
}
