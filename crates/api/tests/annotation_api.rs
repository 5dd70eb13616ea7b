//! HTTP-level integration tests for `/api/annotations`.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn seed_log(pool: &PgPool) {
    post_json(
        common::build_test_app(pool.clone()),
        "/api/heats",
        json!({"heat_number": "A1234567"}),
    )
    .await;
    let response = put_json(
        common::build_test_app(pool.clone()),
        "/api/heats/A1234567/logs/L1",
        json!({"log_number": 1, "annotations": [{"position": 10, "type": "crack"}]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_annotation_returns_201(pool: PgPool) {
    seed_log(&pool).await;

    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/annotations",
        json!({
            "log_id": "L1",
            "position": 4.5,
            "type": "pore",
            "note": "near weld",
            "user": {"name": "Dana", "role": "inspector", "color": "#ff0000"}
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["log_id"], "L1");
    assert_eq!(json["type"], "pore");
    assert_eq!(json["user_name"], "Dana");

    // The new annotation joins the existing set without replacing it.
    let response = get(common::build_test_app(pool), "/api/logs/L1/annotations").await;
    let json = body_json(response).await;
    let types: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["pore", "crack"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_annotation_for_unknown_log_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/annotations",
        json!({"log_id": "NOPE", "position": 1, "type": "crack"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_annotation_without_type_returns_400(pool: PgPool) {
    seed_log(&pool).await;
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/annotations",
        json!({"log_id": "L1", "position": 1}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "type is required");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_annotation_then_404(pool: PgPool) {
    seed_log(&pool).await;
    let response = get(common::build_test_app(pool.clone()), "/api/logs/L1/annotations").await;
    let id = body_json(response).await[0]["id"].as_i64().unwrap();

    let uri = format!("/api/annotations/{id}");
    let response = delete(common::build_test_app(pool.clone()), &uri).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete(common::build_test_app(pool), &uri).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_annotation_with_null_log_id_returns_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/annotations",
        json!({"log_id": null, "position": 1, "type": "crack"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_with_non_numeric_id_returns_json_400(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = delete(app, "/api/annotations/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "'abc' is not a valid annotation id");
}
