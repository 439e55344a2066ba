use thiserror::Error;

/// Errors raised by the analysis pipeline.
///
/// The taxonomy maps one-to-one onto the externally visible status codes:
/// `NotFound` and `InsufficientData` surface as 404, `BadRequest` as 400,
/// `Internal` as 500. Failures are never retried; each is raised at its
/// origin and passed through unmodified to the request boundary.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Zero rows matched the department filter.
    #[error("no data found for the specified department")]
    NotFound,

    /// Fewer rows than the configured minimum sample count.
    #[error(
        "not sufficient data found for OLS analysis, need at least {required} data points, found {found} data points"
    )]
    InsufficientData { required: usize, found: usize },

    /// The final computed p-value is not a well-formed number.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Storage, processing, encoding, or statistical failure.
    #[error("{0}")]
    Internal(String),
}

impl AnalysisError {
    /// Wrap an arbitrary cause as an internal failure with context.
    pub fn internal(context: &str, cause: impl std::fmt::Display) -> Self {
        Self::Internal(format!("{context}: {cause}"))
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::AnalysisError;

    #[test]
    fn insufficient_data_message_reports_counts() {
        let err = AnalysisError::InsufficientData {
            required: 10,
            found: 4,
        };
        let msg = err.to_string();
        assert!(msg.contains("at least 10"));
        assert!(msg.contains("found 4"));
    }

    #[test]
    fn internal_attaches_context() {
        let err = AnalysisError::internal("model not created", "singular matrix");
        assert_eq!(err.to_string(), "model not created: singular matrix");
    }
}
