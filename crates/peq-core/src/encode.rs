//! Categorical feature encoding.
//!
//! Expands each categorical column into drop-first indicator columns and
//! joins them back onto a snapshot of the raw table by the identifier key.
//! The snapshot join is deliberate: the encoded table carries the original
//! column values plus the new indicators, not the intermediate imputation
//! artifacts. Indicator levels themselves are derived from the imputed
//! column, so missing categories fall into the mode level.

use peq_model::{AnalysisConfig, AnalysisError, ColumnKind, Result};
use polars::prelude::{
    DataFrame, DataFrameOps, DataType, IntoLazy, JoinArgs, JoinType, MaintainOrderJoin, col,
};
use tracing::info;

use crate::frame::polars_err;
use crate::process::process_column;

/// Result of imputation plus categorical encoding.
#[derive(Debug, Clone)]
pub struct ProcessedTable {
    /// Raw table joined with the generated indicator columns.
    pub data: DataFrame,
    /// Generated indicator column names (`<column>_<level>`).
    pub indicator_columns: Vec<String>,
    /// Source column names that were expanded into indicators.
    pub encoded_columns: Vec<String>,
}

impl ProcessedTable {
    /// Configured feature list with encoded source columns replaced by
    /// their indicator columns.
    pub fn expanded_features(&self, config: &AnalysisConfig) -> Vec<String> {
        config
            .feature_columns
            .iter()
            .filter(|column| !self.encoded_columns.contains(*column))
            .cloned()
            .chain(self.indicator_columns.iter().cloned())
            .collect()
    }
}

/// Impute every configured column in declaration order and one-hot encode
/// the categorical ones.
pub fn process_table(df: &DataFrame, config: &AnalysisConfig) -> Result<ProcessedTable> {
    let raw = df.clone();
    let mut work = df.clone();
    let mut encoded = raw.clone();
    let mut indicator_columns = Vec::new();
    let mut encoded_columns = Vec::new();

    for spec in &config.column_specs {
        process_column(&mut work, spec)?;
        if spec.kind != ColumnKind::Categorical {
            continue;
        }

        let dummies = work
            .select([spec.name.as_str()])
            .map_err(polars_err("categorical column select failed"))?
            .to_dummies(None, true, false)
            .map_err(polars_err("one-hot encoding failed"))?;
        let prefix = format!("{}_", spec.name);
        let generated: Vec<String> = dummies
            .get_column_names()
            .iter()
            .filter(|name| name.starts_with(&prefix))
            .map(|name| name.to_string())
            .collect();
        if generated.is_empty() {
            return Err(AnalysisError::Internal(format!(
                "column '{}' produced no indicator columns (single level)",
                spec.name
            )));
        }

        let mut keyed = work
            .select([config.id_column.as_str()])
            .map_err(polars_err("identifier column select failed"))?;
        for name in &generated {
            let indicator = dummies
                .column(name)
                .map_err(polars_err("indicator column lookup failed"))?
                .cast(&DataType::Float64)
                .map_err(polars_err("indicator column cast failed"))?;
            keyed
                .with_column(indicator)
                .map_err(polars_err("indicator column append failed"))?;
        }

        let mut join_args = JoinArgs::new(JoinType::Inner);
        join_args.maintain_order = MaintainOrderJoin::Left;
        encoded = encoded
            .lazy()
            .join(
                keyed.lazy(),
                [col(config.id_column.as_str())],
                [col(config.id_column.as_str())],
                join_args,
            )
            .collect()
            .map_err(polars_err("indicator join failed"))?;
        indicator_columns.extend(generated);
        encoded_columns.push(spec.name.clone());
    }

    info!(
        indicators = ?indicator_columns,
        encoded = ?encoded_columns,
        rows = encoded.height(),
        "processed employee table"
    );
    Ok(ProcessedTable {
        data: encoded,
        indicator_columns,
        encoded_columns,
    })
}
