//! Employee store access over libSQL.
//!
//! One read path: a filtered or unfiltered select against the employees
//! table. Every call opens its own connection and discards it on return;
//! there is no pooling or caching, so data is re-read fresh per request.

use libsql::Builder;
use peq_model::{AnalysisError, EmployeeRecord, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Handle to the employees database.
///
/// Holds only the database path and the sample threshold; connections are
/// opened per call.
#[derive(Debug, Clone)]
pub struct EmployeeStore {
    path: PathBuf,
    min_sample_count: usize,
}

impl EmployeeStore {
    pub fn new(path: impl AsRef<Path>, min_sample_count: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            min_sample_count,
        }
    }

    /// Fetch employee records, optionally filtered by exact department match.
    ///
    /// # Errors
    ///
    /// - `NotFound` when zero rows match.
    /// - `InsufficientData` when fewer than the configured minimum match.
    /// - `Internal` on any connection or query failure.
    pub async fn fetch(&self, department: Option<&str>) -> Result<Vec<EmployeeRecord>> {
        let conn = self.connect().await?;
        let mut rows = match department {
            Some(department) => conn
                .query(
                    "SELECT id, department, protected_class, tenure, performance, compensation \
                     FROM employees WHERE department = ?1",
                    libsql::params![department],
                )
                .await
                .map_err(|e| AnalysisError::internal("employee query failed", e))?,
            None => conn
                .query(
                    "SELECT id, department, protected_class, tenure, performance, compensation \
                     FROM employees",
                    (),
                )
                .await
                .map_err(|e| AnalysisError::internal("employee query failed", e))?,
        };

        let mut records = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| AnalysisError::internal("employee row read failed", e))?
        {
            records.push(row_to_record(&row)?);
        }

        if records.is_empty() {
            return Err(AnalysisError::NotFound);
        }
        if records.len() < self.min_sample_count {
            return Err(AnalysisError::InsufficientData {
                required: self.min_sample_count,
                found: records.len(),
            });
        }
        info!(
            department = department.unwrap_or("<all>"),
            rows = records.len(),
            "fetched employee data"
        );
        Ok(records)
    }

    /// Create the employees table when absent.
    pub async fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect().await?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY,
                department TEXT NOT NULL,
                protected_class TEXT,
                tenure INTEGER,
                performance INTEGER,
                compensation INTEGER
            )",
            (),
        )
        .await
        .map_err(|e| AnalysisError::internal("schema creation failed", e))?;
        debug!(path = %self.path.display(), "employees schema ensured");
        Ok(())
    }

    /// Insert records, replacing any existing row with the same id.
    pub async fn insert_records(&self, records: &[EmployeeRecord]) -> Result<()> {
        let conn = self.connect().await?;
        for record in records {
            conn.execute(
                "INSERT OR REPLACE INTO employees \
                 (id, department, protected_class, tenure, performance, compensation) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    record.id,
                    record.department.as_str(),
                    record.protected_class.clone(),
                    record.tenure,
                    record.performance,
                    record.compensation
                ],
            )
            .await
            .map_err(|e| AnalysisError::internal("employee insert failed", e))?;
        }
        Ok(())
    }

    async fn connect(&self) -> Result<libsql::Connection> {
        let path = self
            .path
            .to_str()
            .ok_or_else(|| AnalysisError::Internal("invalid database path".to_string()))?;
        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AnalysisError::internal("database open failed", e))?;
        db.connect()
            .map_err(|e| AnalysisError::internal("database connect failed", e))
    }
}

fn row_to_record(row: &libsql::Row) -> Result<EmployeeRecord> {
    let read = |e: libsql::Error| AnalysisError::internal("employee column read failed", e);
    Ok(EmployeeRecord {
        id: row.get::<i64>(0).map_err(read)?,
        department: row.get::<String>(1).map_err(read)?,
        protected_class: row.get::<Option<String>>(2).map_err(read)?,
        tenure: row.get::<Option<i64>>(3).map_err(read)?,
        performance: row.get::<Option<i64>>(4).map_err(read)?,
        compensation: row.get::<Option<i64>>(5).map_err(read)?,
    })
}
