//! Store boundary tests: filtering, NotFound, InsufficientData.

use peq_model::{AnalysisError, EmployeeRecord};
use peq_store::EmployeeStore;

fn record(id: i64, department: &str) -> EmployeeRecord {
    EmployeeRecord {
        id,
        department: department.to_string(),
        protected_class: Some(["A", "B", "C"][(id % 3) as usize].to_string()),
        tenure: Some(id % 8),
        performance: Some(id % 5),
        compensation: Some(40_000 + 900 * (id % 8) + 400 * (id % 5)),
    }
}

async fn seeded_store(rows: &[EmployeeRecord]) -> (tempfile::TempDir, EmployeeStore) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = EmployeeStore::new(dir.path().join("employees.db"), 10);
    store.ensure_schema().await.expect("schema");
    store.insert_records(rows).await.expect("seed");
    (dir, store)
}

#[tokio::test]
async fn fetch_without_filter_returns_all_rows() {
    let rows: Vec<EmployeeRecord> = (1..=12).map(|id| record(id, "Engineering")).collect();
    let (_dir, store) = seeded_store(&rows).await;
    let fetched = store.fetch(None).await.expect("fetch");
    assert_eq!(fetched.len(), 12);
    assert_eq!(fetched[0], rows[0]);
}

#[tokio::test]
async fn fetch_filters_by_exact_department() {
    let mut rows: Vec<EmployeeRecord> = (1..=10).map(|id| record(id, "Engineering")).collect();
    rows.extend((11..=25).map(|id| record(id, "Sales")));
    let (_dir, store) = seeded_store(&rows).await;
    let fetched = store.fetch(Some("Sales")).await.expect("fetch");
    assert_eq!(fetched.len(), 15);
    assert!(fetched.iter().all(|r| r.department == "Sales"));
}

#[tokio::test]
async fn empty_result_is_not_found() {
    let rows: Vec<EmployeeRecord> = (1..=10).map(|id| record(id, "Engineering")).collect();
    let (_dir, store) = seeded_store(&rows).await;
    let err = store.fetch(Some("Legal")).await.expect_err("not found");
    assert!(matches!(err, AnalysisError::NotFound));
}

#[tokio::test]
async fn nine_rows_are_insufficient() {
    let rows: Vec<EmployeeRecord> = (1..=9).map(|id| record(id, "Engineering")).collect();
    let (_dir, store) = seeded_store(&rows).await;
    let err = store.fetch(None).await.expect_err("insufficient");
    match err {
        AnalysisError::InsufficientData { required, found } => {
            assert_eq!(required, 10);
            assert_eq!(found, 9);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn ten_rows_meet_the_threshold() {
    let rows: Vec<EmployeeRecord> = (1..=10).map(|id| record(id, "Engineering")).collect();
    let (_dir, store) = seeded_store(&rows).await;
    let fetched = store.fetch(None).await.expect("fetch");
    assert_eq!(fetched.len(), 10);
}

#[tokio::test]
async fn null_analysis_columns_survive_the_round_trip() {
    let mut rows: Vec<EmployeeRecord> = (1..=10).map(|id| record(id, "Engineering")).collect();
    rows[3].tenure = None;
    rows[5].protected_class = None;
    let (_dir, store) = seeded_store(&rows).await;
    let fetched = store.fetch(None).await.expect("fetch");
    assert_eq!(fetched[3].tenure, None);
    assert_eq!(fetched[5].protected_class, None);
}
