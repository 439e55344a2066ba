//! Statistical pipeline for pay-equity analysis.
//!
//! Turns employee records into a single p-value in four stages:
//!
//! 1. [`frame`]: build a polars frame from the fetched records.
//! 2. [`process`] / [`encode`]: per-column imputation, type coercion, and
//!    indicator (one-hot) expansion of categorical columns.
//! 3. [`ols`]: ordinary-least-squares fitting with per-coefficient t-test
//!    p-values and nested-model ANOVA comparison.
//! 4. [`pvalue`]: dispatch between the numerical path (read one coefficient
//!    p-value) and the categorical path (joint F-test over all indicator
//!    levels).
//!
//! The pipeline is stateless: nothing is cached between invocations.

pub mod encode;
pub mod frame;
pub mod ols;
pub mod process;
pub mod pvalue;

pub use encode::{ProcessedTable, process_table};
pub use frame::frame_from_records;
pub use ols::{FittedModel, anova_nested, fit};
pub use process::process_column;
pub use pvalue::compute_pvalue;
