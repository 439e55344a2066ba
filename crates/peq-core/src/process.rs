//! Per-column imputation and type coercion.

use std::collections::BTreeMap;

use peq_model::{ColumnKind, ColumnSpec, FillStrategy, Result};
use polars::prelude::{Column, DataFrame};
use tracing::debug;

use crate::frame::{optional_values_f64, optional_values_string, polars_err};

/// Process one column in place: fill missing values per the spec's strategy,
/// then coerce to the declared semantic type.
///
/// Columns must be processed in configuration order: the fill value is
/// computed over the current state of the table, so earlier imputations are
/// visible to later columns.
pub fn process_column(df: &mut DataFrame, spec: &ColumnSpec) -> Result<()> {
    match spec.kind {
        ColumnKind::Numeric => {
            let values = optional_values_f64(df, &spec.name)?;
            let fill = match spec.fill {
                FillStrategy::Median => median(&values),
                // Numeric mode fill is not configured today, but the strategy
                // enum is closed, so handle it the same way as categorical.
                FillStrategy::Mode => mode_f64(&values),
            };
            let coerced: Vec<Option<i64>> = values
                .iter()
                .map(|value| value.or(fill).map(|v| v as i64))
                .collect();
            debug!(column = %spec.name, fill = ?fill, "numeric column processed");
            df.with_column(Column::new(spec.name.as_str().into(), coerced))
                .map_err(polars_err("numeric column replace failed"))?;
        }
        ColumnKind::Categorical => {
            let values = optional_values_string(df, &spec.name)?;
            let fill = mode_string(&values);
            let coerced: Vec<Option<String>> = values
                .iter()
                .map(|value| value.clone().or_else(|| fill.clone()))
                .collect();
            debug!(column = %spec.name, fill = ?fill, "categorical column processed");
            df.with_column(Column::new(spec.name.as_str().into(), coerced))
                .map_err(polars_err("categorical column replace failed"))?;
        }
    }
    Ok(())
}

/// Median with even-count interpolation, ignoring nulls.
/// Returns `None` when the column holds no values at all.
fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    if present.is_empty() {
        return None;
    }
    present.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = present.len() / 2;
    if present.len() % 2 == 0 {
        Some((present[mid - 1] + present[mid]) / 2.0)
    } else {
        Some(present[mid])
    }
}

/// Most frequent string value, ignoring nulls.
///
/// Ties are broken by value order (largest of the tied values wins); callers
/// should treat the tie choice as implementation-defined.
fn mode_string(values: &[Option<String>]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values.iter().flatten() {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(value, _)| value.to_string())
}

/// Most frequent numeric value, ignoring nulls. Same tie policy as strings:
/// the largest of the tied values wins, under `f64::total_cmp` order.
fn mode_f64(values: &[Option<f64>]) -> Option<f64> {
    let mut counts: BTreeMap<u64, (f64, usize)> = BTreeMap::new();
    for value in values.iter().flatten() {
        let entry = counts.entry(value.to_bits()).or_insert((*value, 0));
        entry.1 += 1;
    }
    counts
        .into_values()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.total_cmp(&b.0)))
        .map(|(value, _)| value)
}
