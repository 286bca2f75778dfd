pub mod health;
pub mod products;
pub mod recommendations;
pub mod size_charts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /products                  list (?tenant_id=), create
/// /products/{id}             get
/// /size-charts               list (?tenant_id=&category=), upsert
/// /recommend                 recommend for a stored product (POST)
/// /quick-recommend           recommend from an inline size table (POST)
/// /body-analysis             body estimate and BMI summary (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/size-charts", size_charts::router())
        .merge(recommendations::router())
}
