//! Table-shaped datasets loaded from the radar database.
//!
//! The `iteration` table gets a typed representation ([`crate::record`])
//! because the transform layer computes over it. The other three tables are
//! opaque to this pipeline and are carried as dynamic [`Table`] values,
//! preserving column names and cell types exactly as declared in the schema.

use serde::{Deserialize, Serialize};

use crate::record::Iteration;
use crate::state::DatasetKind;

/// A single cell value, mirroring the SQLite storage classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// SQL NULL.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// 64-bit float.
    Real(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Blob(Vec<u8>),
}

impl Value {
    /// Check whether this cell is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<rusqlite::types::Value> for Value {
    fn from(value: rusqlite::types::Value) -> Self {
        match value {
            rusqlite::types::Value::Null => Self::Null,
            rusqlite::types::Value::Integer(i) => Self::Integer(i),
            rusqlite::types::Value::Real(r) => Self::Real(r),
            rusqlite::types::Value::Text(t) => Self::Text(t),
            rusqlite::types::Value::Blob(b) => Self::Blob(b),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(t) => f.write_str(t),
            Self::Blob(b) => write!(f, "<blob {} bytes>", b.len()),
        }
    }
}

/// An untyped table: column names plus rows of dynamic cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Source table name.
    pub name: String,
    /// Column names in declaration order.
    pub columns: Vec<String>,
    /// Rows in result order; each row has one cell per column.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The four datasets loaded once at startup.
///
/// All derived series are computed from `iteration`; the raw tables are
/// only ever displayed verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Datasets {
    /// Typed iteration rows, in database result order.
    pub iteration: Vec<Iteration>,
    /// Raw `iteration` table, for verbatim display.
    pub iteration_table: Table,
    /// Raw `plate_box` table.
    pub plate_box: Table,
    /// Raw `run_parameters` table.
    pub run_parameters: Table,
    /// Raw `travel` table.
    pub travel: Table,
}

impl Datasets {
    /// The raw table behind a dashboard dataset label.
    #[must_use]
    pub fn table(&self, kind: DatasetKind) -> &Table {
        match kind {
            DatasetKind::Iteration => &self.iteration_table,
            DatasetKind::PlateBox => &self.plate_box,
            DatasetKind::RunParameters => &self.run_parameters,
            DatasetKind::Travel => &self.travel,
        }
    }

    /// Distinct travel identifiers in first-seen order.
    #[must_use]
    pub fn travel_ids(&self) -> Vec<i64> {
        let mut seen = Vec::new();
        for it in &self.iteration {
            if !seen.contains(&it.travel_id) {
                seen.push(it.travel_id);
            }
        }
        seen
    }
}
