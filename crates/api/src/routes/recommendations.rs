//! Recommendation routes, merged directly into `/api/v1`.

use axum::routing::post;
use axum::Router;

use crate::handlers::recommendations;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recommend", post(recommendations::recommend))
        .route("/quick-recommend", post(recommendations::quick_recommend))
        .route("/body-analysis", post(recommendations::body_analysis))
}
