use serde::{Deserialize, Serialize};

/// One employee row as stored in the employees table.
///
/// `id` is unique and stable; it is the join key used when generated
/// indicator columns are merged back onto the raw frame. Any of the
/// analysis columns may be missing in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: i64,
    pub department: String,
    pub protected_class: Option<String>,
    pub tenure: Option<i64>,
    pub performance: Option<i64>,
    pub compensation: Option<i64>,
}
