//! Route definitions for the product catalog, mounted at `/products`.
//!
//! ```text
//! GET    /        list_products (?tenant_id=&limit=&offset=)
//! POST   /        create_product
//! GET    /{id}    get_product
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list_products).post(products::create_product))
        .route("/{id}", get(products::get_product))
}
