//! Route definitions for brand size charts, mounted at `/size-charts`.

use axum::routing::get;
use axum::Router;

use crate::handlers::size_charts;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(size_charts::list_size_chart).post(size_charts::upsert_size_chart),
    )
}
