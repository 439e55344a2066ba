//! P-value engine: dispatch between the numerical and categorical paths.

use peq_model::{AnalysisConfig, AnalysisError, EmployeeRecord, Result};
use tracing::info;

use crate::encode::{ProcessedTable, process_table};
use crate::frame::frame_from_records;
use crate::ols::{anova_nested, fit};

/// Compute the p-value of `feature`'s association with the label column,
/// rounded to three decimal places.
///
/// Features that were expanded into indicators take the categorical path
/// (joint F-test over all indicator levels); everything else takes the
/// numerical path (single coefficient p-value). A feature name outside the
/// fitted design matrix is an `Internal` error, never a silent null.
pub fn compute_pvalue(
    records: &[EmployeeRecord],
    config: &AnalysisConfig,
    feature: &str,
) -> Result<f64> {
    let df = frame_from_records(records)?;
    let processed = process_table(&df, config)?;
    let pvalue = if processed.encoded_columns.iter().any(|c| c == feature) {
        info!(feature, "computing p-value for categorical feature");
        categorical_pvalue(&processed, config, feature)?
    } else {
        info!(feature, "computing p-value for numerical feature");
        numerical_pvalue(&processed, config, feature)?
    };
    Ok(round3(pvalue))
}

/// One model over all expanded features; read the coefficient p-value.
fn numerical_pvalue(
    processed: &ProcessedTable,
    config: &AnalysisConfig,
    feature: &str,
) -> Result<f64> {
    let features = processed.expanded_features(config);
    let model = fit(&processed.data, &features, &config.label_column)?;
    model.pvalue(feature).ok_or_else(|| {
        AnalysisError::Internal(format!(
            "p-value could not be generated: feature '{feature}' is not a column of the fitted design matrix"
        ))
    })
}

/// Full model with indicators against a reduced model without the feature;
/// joint significance via the nested F-test.
fn categorical_pvalue(
    processed: &ProcessedTable,
    config: &AnalysisConfig,
    feature: &str,
) -> Result<f64> {
    let full_features = processed.expanded_features(config);
    let full = fit(&processed.data, &full_features, &config.label_column)?;

    let reduced_features: Vec<String> = config
        .feature_columns
        .iter()
        .filter(|column| column.as_str() != feature)
        .cloned()
        .collect();
    let reduced = fit(&processed.data, &reduced_features, &config.label_column)?;

    anova_nested(&reduced, &full)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
