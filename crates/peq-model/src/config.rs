//! Analysis configuration: column specs, feature list, sample threshold.

use serde::{Deserialize, Serialize};

/// Semantic type a column is coerced to after imputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer-valued measurement (tenure, performance, compensation).
    Numeric,
    /// Categorical code expanded into indicator columns before fitting.
    Categorical,
}

/// Strategy used to fill missing values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FillStrategy {
    /// Replace nulls with the column median (numeric columns).
    Median,
    /// Replace nulls with the column mode (categorical columns).
    /// Tie-breaking between equally frequent values is implementation-defined.
    Mode,
}

/// Static per-column processing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
    pub fill: FillStrategy,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, kind: ColumnKind, fill: FillStrategy) -> Self {
        Self {
            name: name.into(),
            kind,
            fill,
        }
    }
}

/// Immutable configuration for one analysis pipeline.
///
/// Built once at startup and passed explicitly into each component; no
/// component reads ambient global state.
///
/// Column specs are ordered, and the order is load-bearing: imputation is
/// sequential, so a later column's median or mode is computed over the
/// partially imputed table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum number of rows required before processing proceeds.
    pub min_sample_count: usize,
    /// Unique row identifier, used as the join key during encoding.
    pub id_column: String,
    /// Regression response column.
    pub label_column: String,
    /// Regression feature columns, pre-encoding.
    pub feature_columns: Vec<String>,
    /// Per-column imputation and type coercion specs, in processing order.
    pub column_specs: Vec<ColumnSpec>,
    /// Feature whose p-value the service reports.
    pub analysis_feature: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sample_count: 10,
            id_column: "id".to_string(),
            label_column: "compensation".to_string(),
            feature_columns: vec![
                "protected_class".to_string(),
                "tenure".to_string(),
                "performance".to_string(),
            ],
            column_specs: vec![
                ColumnSpec::new("protected_class", ColumnKind::Categorical, FillStrategy::Mode),
                ColumnSpec::new("tenure", ColumnKind::Numeric, FillStrategy::Median),
                ColumnSpec::new("performance", ColumnKind::Numeric, FillStrategy::Median),
                ColumnSpec::new("compensation", ColumnKind::Numeric, FillStrategy::Median),
            ],
            analysis_feature: "protected_class".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Look up the spec for a column by name.
    pub fn spec(&self, column: &str) -> Option<&ColumnSpec> {
        self.column_specs.iter().find(|spec| spec.name == column)
    }

    /// True when the column is configured as categorical.
    pub fn is_categorical(&self, column: &str) -> bool {
        self.spec(column)
            .is_some_and(|spec| spec.kind == ColumnKind::Categorical)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalysisConfig, ColumnKind, FillStrategy};

    #[test]
    fn default_config_orders_specs() {
        let config = AnalysisConfig::default();
        let names: Vec<&str> = config
            .column_specs
            .iter()
            .map(|spec| spec.name.as_str())
            .collect();
        assert_eq!(
            names,
            ["protected_class", "tenure", "performance", "compensation"]
        );
    }

    #[test]
    fn default_config_marks_protected_class_categorical() {
        let config = AnalysisConfig::default();
        assert!(config.is_categorical("protected_class"));
        assert!(!config.is_categorical("tenure"));
        let spec = config.spec("protected_class").expect("spec");
        assert_eq!(spec.kind, ColumnKind::Categorical);
        assert_eq!(spec.fill, FillStrategy::Mode);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AnalysisConfig::default();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: AnalysisConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
