//! Request handlers.

use axum::Json;
use axum::extract::{Query, State};
use peq_core::compute_pvalue;
use peq_model::AnalysisError;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct PvalueParams {
    /// Optional exact-match department filter.
    pub department: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PvalueResponse {
    pub pvalue: f64,
}

/// Welcome payload listing the available endpoints.
pub async fn home() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the Employee Compensation Analysis API",
        "endpoints": {
            "/pvalue": "Get the p-value for the specified department"
        }
    }))
}

/// Run the full pipeline for the configured analysis feature.
pub async fn pvalue(
    State(state): State<AppState>,
    Query(params): Query<PvalueParams>,
) -> Result<Json<PvalueResponse>, ApiError> {
    let department = params.department.as_deref();
    info!(
        department = department.unwrap_or("<all>"),
        feature = %state.config.analysis_feature,
        "p-value requested"
    );
    let records = state.store.fetch(department).await?;
    let pvalue = compute_pvalue(&records, &state.config, &state.config.analysis_feature)?;
    if !pvalue.is_finite() {
        return Err(AnalysisError::BadRequest(
            "p-value is not a well-formed number".to_string(),
        )
        .into());
    }
    Ok(Json(PvalueResponse { pvalue }))
}
