//! HTTP-level tests for the recommendation endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_json};
use serde_json::json;
use sqlx::PgPool;

async fn create_tee(pool: &PgPool, measurements: serde_json::Value) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/products",
        json!({
            "tenant_id": 1,
            "sku": "TEE-100",
            "name": "Everyday Tee",
            "category": "t-shirt",
            "fit_type": "regular_fit",
            "fabric_composition": {"cotton": 100},
            "measurements": measurements
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["product"]["id"]
        .as_i64()
        .unwrap()
}

/// Insert a product with no size table, bypassing ingest validation.
async fn insert_sizeless_product(pool: &PgPool, category: Option<&str>) -> i64 {
    sqlx::query_scalar::<_, i64>(
        "INSERT INTO products (tenant_id, sku, name, category) \
         VALUES (1, 'PLAIN-1', 'Plain Tee', $1) RETURNING id",
    )
    .bind(category)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn upsert_chart_row(pool: &PgPool, size_code: &str, chest_min: f64, chest_max: f64) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/size-charts",
        json!({
            "tenant_id": 1,
            "category": "t-shirt",
            "size_code": size_code,
            "measurements": {"chest_min": chest_min, "chest_max": chest_max}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// POST /quick-recommend
// ---------------------------------------------------------------------------

#[tokio::test]
async fn quick_recommend_uses_default_table() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/quick-recommend",
        json!({"height_cm": 180, "weight_kg": 85, "body_shape": "average"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["recommended_size"], "M");
    assert_eq!(data["confidence_score"], 84);
    assert_eq!(data["confidence_band"], "high");
    assert_eq!(data["size_breakdown"].as_array().unwrap().len(), 4);
    assert_eq!(data["fit_details"][0]["measurement"], "chest");
    assert!(data["ignored_keys"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn quick_recommend_null_shape_and_unknown_fit_type_use_defaults() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/quick-recommend",
        json!({
            "height_cm": 180,
            "weight_kg": 85,
            "body_shape": null,
            "fit_type": "baggy"
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    // Same outcome as average shape on a regular fit.
    assert_eq!(data["recommended_size"], "M");
    assert_eq!(data["confidence_score"], 84);
}

#[tokio::test]
async fn body_analysis_accepts_null_shape() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/body-analysis",
        json!({"height_cm": 175, "weight_kg": 70, "body_shape": null}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn quick_recommend_reports_ignored_keys() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/quick-recommend",
        json!({
            "height_cm": 165,
            "weight_kg": 58,
            "body_shape": "slim",
            "preferred_fit": "tight",
            "sizes": {
                "S": {"chest": 94, "inseam": 80},
                "M": {"chest": 100}
            }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["ignored_keys"], json!(["S.inseam"]));
    assert!(["S", "M"].contains(&data["recommended_size"].as_str().unwrap()));
}

#[tokio::test]
async fn body_analysis_returns_bmi_and_measurements() {
    let app = common::build_db_free_app();
    let response = post_json(
        app,
        "/api/v1/body-analysis",
        json!({"height_cm": 180, "weight_kg": 85, "body_shape": "athletic"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["bmi"], 26.2);
    assert_eq!(data["bmi_category"], "overweight");
    assert!(data["measurements"]["chest"].as_f64().unwrap() > 0.0);
}

// ---------------------------------------------------------------------------
// POST /recommend
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn recommend_for_stored_product(pool: PgPool) {
    let id = create_tee(
        &pool,
        json!({
            "S": {"chest_width": 104, "length": 70},
            "M": {"chest_width": 110, "length": 72},
            "L": {"chest_width": 116, "length": 74},
            "XL": {"chest_width": 122, "length": 76}
        }),
    )
    .await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/recommend",
        json!({"product_id": id, "user_height": 180, "user_weight": 85, "body_shape": "average"}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["recommended_size"], "M");
    assert_eq!(data["used_fallback_chart"], false);
    let codes: Vec<&str> = data["size_breakdown"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["size_code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["S", "M", "L", "XL"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recommend_unknown_product_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/recommend",
        json!({"product_id": 999999, "height_cm": 180, "weight_kg": 85}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recommend_falls_back_to_category_chart(pool: PgPool) {
    let id = insert_sizeless_product(&pool, Some("t-shirt")).await;
    upsert_chart_row(&pool, "M", 107.0, 113.0).await;
    upsert_chart_row(&pool, "S", 100.0, 108.0).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/recommend",
        json!({"product_id": id, "height_cm": 180, "weight_kg": 85}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["used_fallback_chart"], true);
    assert_eq!(data["recommended_size"], "M");
    assert_eq!(data["size_breakdown"][0]["size_code"], "S");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn recommend_without_sizes_or_chart_is_no_size_data(pool: PgPool) {
    let id = insert_sizeless_product(&pool, Some("hoodie")).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/recommend",
        json!({"product_id": id, "height_cm": 170, "weight_kg": 70}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NO_SIZE_DATA");
    assert_eq!(json["error"], "Size information is unavailable for this product");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn deactivated_product_is_not_recommended(pool: PgPool) {
    let id = create_tee(&pool, json!({"M": {"chest_width": 110}})).await;
    sqlx::query("UPDATE products SET is_active = false WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/recommend",
        json!({"product_id": id, "height_cm": 180, "weight_kg": 85}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
