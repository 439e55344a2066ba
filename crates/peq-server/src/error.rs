//! Error-to-status translation at the request boundary.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use peq_model::AnalysisError;
use serde_json::json;
use tracing::{error, warn};

/// Transport wrapper mapping the analysis taxonomy onto HTTP statuses.
///
/// `NotFound` and `InsufficientData` become 404, `BadRequest` 400, and
/// `Internal` 500. The underlying cause message is carried into the error
/// payload unmodified.
#[derive(Debug)]
pub struct ApiError(pub AnalysisError);

impl From<AnalysisError> for ApiError {
    fn from(error: AnalysisError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AnalysisError::NotFound | AnalysisError::InsufficientData { .. } => {
                StatusCode::NOT_FOUND
            }
            AnalysisError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AnalysisError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let detail = self.0.to_string();
        if status.is_server_error() {
            error!(%status, %detail, "request failed");
        } else {
            warn!(%status, %detail, "request rejected");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
