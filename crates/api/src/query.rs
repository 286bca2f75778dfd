//! Shared query parameter types for API handlers.

use fitengine_core::types::DbId;
use serde::Deserialize;

/// Tenant-scoped pagination (`?tenant_id=&limit=&offset=`).
///
/// Values are clamped with `catalog::clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct TenantPagination {
    pub tenant_id: DbId,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Selects one brand chart (`?tenant_id=&category=`).
#[derive(Debug, Deserialize)]
pub struct SizeChartParams {
    pub tenant_id: DbId,
    pub category: String,
}
