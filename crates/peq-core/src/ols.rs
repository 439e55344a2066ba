//! Ordinary-least-squares fitting and nested-model comparison.
//!
//! Solves the normal equations with nalgebra and derives per-coefficient
//! two-sided t-test p-values from residual-based standard errors. The
//! retained residual sum of squares and residual degrees of freedom are
//! exactly what [`anova_nested`] needs for the F-test between a reduced and
//! a full model.

use nalgebra::{DMatrix, DVector};
use peq_model::{AnalysisError, Result};
use polars::prelude::DataFrame;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use tracing::debug;

use crate::frame::column_values_f64;

/// Name of the intercept term in every design matrix.
pub const INTERCEPT: &str = "const";

/// One fitted OLS model. Constructed per request and discarded after
/// p-value extraction; never cached.
#[derive(Debug, Clone)]
pub struct FittedModel {
    terms: Vec<String>,
    coefficients: Vec<f64>,
    pvalues: Vec<f64>,
    df_resid: f64,
    ssr: f64,
}

impl FittedModel {
    /// Coefficient p-value for a design-matrix column, by name.
    pub fn pvalue(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.pvalues[idx])
    }

    /// Coefficient estimate for a design-matrix column, by name.
    pub fn coefficient(&self, term: &str) -> Option<f64> {
        self.term_index(term).map(|idx| self.coefficients[idx])
    }

    /// Residual degrees of freedom (rows minus fitted terms).
    pub fn df_resid(&self) -> f64 {
        self.df_resid
    }

    /// Residual sum of squares.
    pub fn ssr(&self) -> f64 {
        self.ssr
    }

    /// Design-matrix column names, intercept first.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.iter().position(|name| name == term)
    }
}

/// Fit an OLS model of `label_column` on `feature_columns` plus an intercept.
///
/// # Errors
///
/// `Internal` when a selected column is absent or holds nulls, when there
/// are not enough rows for a positive residual degree of freedom, or when
/// the design matrix is rank-deficient.
pub fn fit(df: &DataFrame, feature_columns: &[String], label_column: &str) -> Result<FittedModel> {
    let rows = df.height();
    let terms: Vec<String> = std::iter::once(INTERCEPT.to_string())
        .chain(feature_columns.iter().cloned())
        .collect();
    let cols = terms.len();
    if rows <= cols {
        return Err(AnalysisError::Internal(format!(
            "model not created: {rows} rows cannot support {cols} terms"
        )));
    }

    let mut design = DMatrix::<f64>::from_element(rows, cols, 1.0);
    for (j, name) in feature_columns.iter().enumerate() {
        let values = column_values_f64(df, name)
            .map_err(|e| AnalysisError::internal("model not created", e))?;
        for (i, value) in values.into_iter().enumerate() {
            design[(i, j + 1)] = value;
        }
    }
    let response = DVector::<f64>::from_vec(
        column_values_f64(df, label_column)
            .map_err(|e| AnalysisError::internal("model not created", e))?,
    );

    let xtx = design.transpose() * &design;
    let xtx_inv = xtx.try_inverse().ok_or_else(|| {
        AnalysisError::Internal("model not created: design matrix is rank-deficient".to_string())
    })?;
    let coefficients = &xtx_inv * design.transpose() * &response;
    let residuals = &response - &design * &coefficients;
    let ssr = residuals.dot(&residuals);
    let df_resid = (rows - cols) as f64;
    let sigma2 = ssr / df_resid;

    let t_dist = StudentsT::new(0.0, 1.0, df_resid)
        .map_err(|e| AnalysisError::internal("model not created", e))?;
    let pvalues: Vec<f64> = (0..cols)
        .map(|j| {
            let variance = (sigma2 * xtx_inv[(j, j)]).max(0.0);
            let se = variance.sqrt();
            if se > 0.0 {
                let t = coefficients[j] / se;
                2.0 * t_dist.sf(t.abs())
            } else if coefficients[j].abs() > f64::EPSILON {
                // Perfect fit: the coefficient is exact, zero uncertainty.
                0.0
            } else {
                1.0
            }
        })
        .collect();

    debug!(terms = ?terms, ssr, df_resid, "fitted OLS model");
    Ok(FittedModel {
        terms,
        coefficients: coefficients.iter().copied().collect(),
        pvalues,
        df_resid,
        ssr,
    })
}

/// Nested-model F-test (ANOVA): joint significance of the terms present in
/// `full` but not in `reduced`.
///
/// # Errors
///
/// `Internal` when the models are not nested (no dropped degrees of
/// freedom) or the F statistic cannot be evaluated.
pub fn anova_nested(reduced: &FittedModel, full: &FittedModel) -> Result<f64> {
    let df_diff = reduced.df_resid() - full.df_resid();
    if df_diff <= 0.0 {
        return Err(AnalysisError::Internal(
            "anova failed: models are not nested".to_string(),
        ));
    }
    if full.df_resid() <= 0.0 {
        return Err(AnalysisError::Internal(
            "anova failed: full model has no residual degrees of freedom".to_string(),
        ));
    }

    let ssr_diff = reduced.ssr() - full.ssr();
    let f_stat = (ssr_diff / df_diff) / (full.ssr() / full.df_resid());
    if f_stat.is_nan() {
        return Err(AnalysisError::Internal(
            "anova failed: F statistic is undefined".to_string(),
        ));
    }
    if f_stat.is_infinite() {
        // Full model fits perfectly while the reduced one does not.
        return Ok(0.0);
    }

    let f_dist = FisherSnedecor::new(df_diff, full.df_resid())
        .map_err(|e| AnalysisError::internal("anova failed", e))?;
    Ok(f_dist.sf(f_stat.max(0.0)))
}
