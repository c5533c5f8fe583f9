//! Table and query definitions for the radar database.
//!
//! The database is produced by the radar's acquisition process; spangapp
//! only reads it. The names here must match the schema as written by the
//! device.

/// The sensor-sample table.
pub const ITERATION_TABLE: &str = "iteration";

/// The license-plate bounding-region table.
pub const PLATE_BOX_TABLE: &str = "plate_box";

/// The measurement-run configuration table.
pub const RUN_PARAMETERS_TABLE: &str = "run_parameters";

/// The trip/session table.
pub const TRAVEL_TABLE: &str = "travel";

/// All four dataset tables, in load order.
pub const DATASET_TABLES: &[&str] = &[
    ITERATION_TABLE,
    PLATE_BOX_TABLE,
    RUN_PARAMETERS_TABLE,
    TRAVEL_TABLE,
];

/// Columns of `iteration` this pipeline requires to be present and non-null.
pub const REQUIRED_ITERATION_COLUMNS: &[&str] = &[
    "travel_id",
    "timestamp",
    "latitude",
    "longitude",
    "distance",
    "speed",
    "status",
];

/// Query to check whether a table exists.
pub const TABLE_EXISTS: &str = r"
SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1
";

/// The full-table select used for every dataset.
#[must_use]
pub fn select_all(table: &str) -> String {
    format!("SELECT * FROM {table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_tables_complete() {
        assert_eq!(DATASET_TABLES.len(), 4);
        assert!(DATASET_TABLES.contains(&ITERATION_TABLE));
        assert!(DATASET_TABLES.contains(&PLATE_BOX_TABLE));
        assert!(DATASET_TABLES.contains(&RUN_PARAMETERS_TABLE));
        assert!(DATASET_TABLES.contains(&TRAVEL_TABLE));
    }

    #[test]
    fn test_required_iteration_columns() {
        assert!(REQUIRED_ITERATION_COLUMNS.contains(&"travel_id"));
        assert!(REQUIRED_ITERATION_COLUMNS.contains(&"timestamp"));
        assert!(REQUIRED_ITERATION_COLUMNS.contains(&"status"));
        assert_eq!(REQUIRED_ITERATION_COLUMNS.len(), 7);
    }

    #[test]
    fn test_select_all() {
        assert_eq!(select_all(ITERATION_TABLE), "SELECT * FROM iteration");
    }
}
