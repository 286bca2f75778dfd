//! Repository for the `size_charts` table.

use fitengine_core::types::DbId;
use sqlx::PgPool;

use crate::models::size_chart::{SizeChart, UpsertSizeChart};

const COLUMNS: &str = "id, tenant_id, category, size_code, measurements, created_at, updated_at";

/// Provides lookups and upserts for brand size charts.
pub struct SizeChartRepo;

impl SizeChartRepo {
    /// Insert a chart size, or replace its measurements if the
    /// `(tenant_id, category, size_code)` row already exists.
    pub async fn upsert(
        pool: &PgPool,
        input: &UpsertSizeChart,
        measurements: &serde_json::Value,
    ) -> Result<SizeChart, sqlx::Error> {
        let query = format!(
            "INSERT INTO size_charts (tenant_id, category, size_code, measurements) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT ON CONSTRAINT uq_size_charts_tenant_category_size \
             DO UPDATE SET measurements = EXCLUDED.measurements, updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SizeChart>(&query)
            .bind(input.tenant_id)
            .bind(&input.category)
            .bind(&input.size_code)
            .bind(measurements)
            .fetch_one(pool)
            .await
    }

    /// All chart rows for a tenant's category. Ordering by nominal size is
    /// left to the caller.
    pub async fn list_for_category(
        pool: &PgPool,
        tenant_id: DbId,
        category: &str,
    ) -> Result<Vec<SizeChart>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM size_charts \
             WHERE tenant_id = $1 AND category = $2 \
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, SizeChart>(&query)
            .bind(tenant_id)
            .bind(category)
            .fetch_all(pool)
            .await
    }
}
