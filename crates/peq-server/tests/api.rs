//! Endpoint tests against a seeded temporary database.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use peq_model::{AnalysisConfig, EmployeeRecord};
use peq_server::{AppState, app};
use peq_store::EmployeeStore;
use serde_json::Value;
use tower::ServiceExt;

fn record(id: i64, department: &str) -> EmployeeRecord {
    let tenure = id % 9;
    let performance = (id * 3) % 5;
    let class = ["A", "B", "C"][(id % 3) as usize];
    let class_offset = match class {
        "A" => 0,
        "B" => 700,
        _ => 1_400,
    };
    EmployeeRecord {
        id,
        department: department.to_string(),
        protected_class: Some(class.to_string()),
        tenure: Some(tenure),
        performance: Some(performance),
        compensation: Some(45_000 + 1_000 * tenure + 600 * performance + class_offset
            + 100 * (id % 7)),
    }
}

async fn seeded_app(rows: &[EmployeeRecord]) -> (tempfile::TempDir, axum::Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("employees.db");
    let config = AnalysisConfig::default();
    let store = EmployeeStore::new(&db_path, config.min_sample_count);
    store.ensure_schema().await.expect("schema");
    store.insert_records(rows).await.expect("seed");
    let router = app(AppState::new(&db_path, config));
    (dir, router)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&bytes).expect("json");
    (status, json)
}

#[tokio::test]
async fn home_lists_endpoints() {
    let rows: Vec<EmployeeRecord> = (1..=12).map(|id| record(id, "Engineering")).collect();
    let (_dir, router) = seeded_app(&rows).await;
    let (status, json) = get_json(router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["endpoints"]["/pvalue"].is_string());
}

#[tokio::test]
async fn pvalue_returns_rounded_float() {
    let rows: Vec<EmployeeRecord> = (1..=40).map(|id| record(id, "Engineering")).collect();
    let (_dir, router) = seeded_app(&rows).await;
    let (status, json) = get_json(router, "/pvalue?department=Engineering").await;
    assert_eq!(status, StatusCode::OK);
    let p = json["pvalue"].as_f64().expect("pvalue");
    assert!((0.0..=1.0).contains(&p), "p = {p}");
    assert_eq!(p, (p * 1000.0).round() / 1000.0);
}

#[tokio::test]
async fn pvalue_without_filter_uses_all_rows() {
    let mut rows: Vec<EmployeeRecord> = (1..=20).map(|id| record(id, "Engineering")).collect();
    rows.extend((21..=40).map(|id| record(id, "Sales")));
    let (_dir, router) = seeded_app(&rows).await;
    let (status, json) = get_json(router, "/pvalue").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["pvalue"].is_number());
}

#[tokio::test]
async fn unknown_department_is_404() {
    let rows: Vec<EmployeeRecord> = (1..=12).map(|id| record(id, "Engineering")).collect();
    let (_dir, router) = seeded_app(&rows).await;
    let (status, json) = get_json(router, "/pvalue?department=Legal").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["detail"].as_str().expect("detail").contains("no data"));
}

#[tokio::test]
async fn small_department_is_404_with_counts() {
    let mut rows: Vec<EmployeeRecord> = (1..=12).map(|id| record(id, "Engineering")).collect();
    rows.extend((13..=17).map(|id| record(id, "Legal")));
    let (_dir, router) = seeded_app(&rows).await;
    let (status, json) = get_json(router, "/pvalue?department=Legal").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let detail = json["detail"].as_str().expect("detail");
    assert!(detail.contains("at least 10"));
    assert!(detail.contains("found 5"));
}

#[tokio::test]
async fn repeated_requests_return_identical_pvalues() {
    let rows: Vec<EmployeeRecord> = (1..=40).map(|id| record(id, "Engineering")).collect();
    let (_dir, router) = seeded_app(&rows).await;
    let (_, first) = get_json(router.clone(), "/pvalue?department=Engineering").await;
    let (_, second) = get_json(router, "/pvalue?department=Engineering").await;
    assert_eq!(first["pvalue"], second["pvalue"]);
}
