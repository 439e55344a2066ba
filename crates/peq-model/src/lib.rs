//! Data model for the pay-equity analysis service.
//!
//! Defines the employee record shape, the per-column processing
//! configuration, and the error taxonomy shared by the store, the
//! statistical core, and the transport layer.

pub mod config;
pub mod error;
pub mod record;

pub use config::{AnalysisConfig, ColumnKind, ColumnSpec, FillStrategy};
pub use error::{AnalysisError, Result};
pub use record::EmployeeRecord;
