//! Frame construction and value extraction helpers.

use peq_model::{AnalysisError, EmployeeRecord, Result};
use polars::prelude::{AnyValue, Column, DataFrame, PolarsError};

/// Adapt a polars error into an internal analysis error with context.
pub(crate) fn polars_err(context: &'static str) -> impl Fn(PolarsError) -> AnalysisError {
    move |error| AnalysisError::internal(context, error)
}

/// Build the working frame from fetched employee records.
///
/// Column order matches the store schema; missing analysis values become
/// nulls so the column processor can impute them.
pub fn frame_from_records(records: &[EmployeeRecord]) -> Result<DataFrame> {
    let ids: Vec<i64> = records.iter().map(|r| r.id).collect();
    let departments: Vec<String> = records.iter().map(|r| r.department.clone()).collect();
    let protected: Vec<Option<String>> = records
        .iter()
        .map(|r| r.protected_class.clone())
        .collect();
    let tenure: Vec<Option<i64>> = records.iter().map(|r| r.tenure).collect();
    let performance: Vec<Option<i64>> = records.iter().map(|r| r.performance).collect();
    let compensation: Vec<Option<i64>> = records.iter().map(|r| r.compensation).collect();

    DataFrame::new(vec![
        Column::new("id".into(), ids),
        Column::new("department".into(), departments),
        Column::new("protected_class".into(), protected),
        Column::new("tenure".into(), tenure),
        Column::new("performance".into(), performance),
        Column::new("compensation".into(), compensation),
    ])
    .map_err(polars_err("frame construction failed"))
}

/// Convert a cell value to a float, treating nulls as missing.
pub fn any_to_f64(value: AnyValue) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Float32(value) => Some(f64::from(value)),
        AnyValue::Float64(value) => Some(value),
        AnyValue::Int8(value) => Some(f64::from(value)),
        AnyValue::Int16(value) => Some(f64::from(value)),
        AnyValue::Int32(value) => Some(f64::from(value)),
        AnyValue::Int64(value) => Some(value as f64),
        AnyValue::UInt8(value) => Some(f64::from(value)),
        AnyValue::UInt16(value) => Some(f64::from(value)),
        AnyValue::UInt32(value) => Some(f64::from(value)),
        AnyValue::UInt64(value) => Some(value as f64),
        AnyValue::Boolean(value) => Some(if value { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Convert a cell value to a string, treating nulls as missing.
pub fn any_to_string(value: AnyValue) -> Option<String> {
    match value {
        AnyValue::Null => None,
        AnyValue::String(value) => Some(value.to_string()),
        AnyValue::StringOwned(value) => Some(value.to_string()),
        value => Some(value.to_string()),
    }
}

/// Extract one column as floats, failing on nulls and non-numeric cells.
///
/// Used to assemble design matrices, where a missing value cannot be
/// silently carried into the fit.
pub fn column_values_f64(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let column = df.column(name).map_err(|_| {
        AnalysisError::Internal(format!("column '{name}' is not present in the table"))
    })?;
    (0..df.height())
        .map(|idx| {
            any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)).ok_or_else(|| {
                AnalysisError::Internal(format!("column '{name}' has a null value at row {idx}"))
            })
        })
        .collect()
}

/// Extract one column as optional floats (nulls preserved).
pub(crate) fn optional_values_f64(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df
        .column(name)
        .map_err(polars_err("column lookup failed"))?;
    Ok((0..df.height())
        .map(|idx| any_to_f64(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}

/// Extract one column as optional strings (nulls preserved).
pub(crate) fn optional_values_string(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(polars_err("column lookup failed"))?;
    Ok((0..df.height())
        .map(|idx| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect())
}
