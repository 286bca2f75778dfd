//! Error mapping at the HTTP boundary. None of these requests reach the
//! database.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, post_raw};
use serde_json::json;

#[tokio::test]
async fn malformed_json_is_rejected() {
    let app = common::build_db_free_app();
    let response = post_raw(app, "/api/v1/quick-recommend", "{not json".to_string()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_height_is_unprocessable() {
    let app = common::build_db_free_app();
    let response = post_json(app, "/api/v1/quick-recommend", json!({"weight_kg": 80})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn sizes_without_scorable_dimension_map_to_missing_measurements() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/quick-recommend",
        json!({
            "height_cm": 180,
            "weight_kg": 85,
            "sizes": {"M": {"length": 74}, "L": {"length": 76}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "MISSING_MEASUREMENTS");
    let message = json["error"].as_str().unwrap();
    assert!(!message.contains("weight"), "engine internals leaked: {message}");
}

#[tokio::test]
async fn non_positive_inline_measurement_is_a_validation_error() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/quick-recommend",
        json!({
            "height_cm": 180,
            "weight_kg": 85,
            "sizes": {"M": {"chest_width": -110}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn blank_sku_fails_validation_before_storage() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/products",
        json!({
            "tenant_id": 1,
            "sku": "",
            "name": "Basic Tee",
            "measurements": {"M": {"chest_width": 110}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn fabric_composition_must_total_one_hundred() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/products",
        json!({
            "tenant_id": 1,
            "sku": "TS-1",
            "name": "Basic Tee",
            "fabric_composition": {"cotton": 60, "polyester": 20},
            "measurements": {"M": {"chest_width": 110}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("100%"));
}

#[tokio::test]
async fn implausible_measurement_is_rejected_at_ingest() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/products",
        json!({
            "tenant_id": 1,
            "sku": "TS-2",
            "name": "Giant Tee",
            "measurements": {"M": {"chest_width": 450}}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn size_chart_row_needs_a_body_range() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/size-charts",
        json!({
            "tenant_id": 1,
            "category": "t-shirt",
            "size_code": "M",
            "measurements": {"length_min": 70, "length_max": 74}
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
