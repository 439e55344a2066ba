//! HTTP transport for the pay-equity analysis service.
//!
//! One read endpoint: `GET /pvalue?department=<name>` runs the full
//! fetch-process-encode-fit pipeline for the configured analysis feature
//! and returns `{"pvalue": <float>}`. The transport holds no state beyond
//! immutable configuration; every request opens its own store connection.

pub mod error;
pub mod logging;
pub mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use peq_model::AnalysisConfig;
use peq_store::EmployeeStore;

/// Shared immutable server state.
#[derive(Clone)]
pub struct AppState {
    pub store: EmployeeStore,
    pub config: Arc<AnalysisConfig>,
}

impl AppState {
    pub fn new(database: impl AsRef<Path>, config: AnalysisConfig) -> Self {
        let store = EmployeeStore::new(database, config.min_sample_count);
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/pvalue", get(routes::pvalue))
        .with_state(state)
}
