//! Data access layer for spangapp.
//!
//! This module opens one read-only connection to the radar's `SQLite`
//! database and loads the four dataset tables in a single pass at startup.
//! Nothing here ever writes.

pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use tracing::{debug, info};

use crate::dataset::{Datasets, Table};
use crate::error::{Error, Result};
use crate::record::{Iteration, IterationStatus};

use schema::{
    select_all, DATASET_TABLES, ITERATION_TABLE, PLATE_BOX_TABLE, RUN_PARAMETERS_TABLE,
    TABLE_EXISTS, TRAVEL_TABLE,
};

/// Read-only handle on the radar database.
#[derive(Debug)]
pub struct Store {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl Store {
    /// Open the database file read-only.
    ///
    /// The file must already exist — this pipeline never creates or
    /// modifies the database.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if the file is missing or cannot
    /// be opened.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(Error::data_unavailable(&path, "database file not found"));
        }

        debug!("Opening database at {}", path.display());
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| Error::data_unavailable(&path, source.to_string()))?;

        info!("Database opened read-only at {}", path.display());
        Ok(Self { path, conn })
    }

    /// Wrap an existing connection.
    ///
    /// Intended for tests and tooling that build an in-memory database.
    #[must_use]
    pub fn from_connection(conn: Connection) -> Self {
        Self {
            path: PathBuf::from(":memory:"),
            conn,
        }
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all four datasets.
    ///
    /// This runs once at startup; every render afterwards works off the
    /// returned in-memory copy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataUnavailable`] if any of the four tables is
    /// absent, and [`Error::MalformedRow`] if a required iteration column
    /// holds a null or untypable value.
    pub fn load(&self) -> Result<Datasets> {
        self.ensure_tables()?;

        let iteration = self.load_iterations()?;
        let iteration_table = self.load_table(ITERATION_TABLE)?;
        let plate_box = self.load_table(PLATE_BOX_TABLE)?;
        let run_parameters = self.load_table(RUN_PARAMETERS_TABLE)?;
        let travel = self.load_table(TRAVEL_TABLE)?;

        info!(
            "Loaded {} iterations, {} plate boxes, {} run parameters, {} travels",
            iteration.len(),
            plate_box.row_count(),
            run_parameters.row_count(),
            travel.row_count(),
        );

        Ok(Datasets {
            iteration,
            iteration_table,
            plate_box,
            run_parameters,
            travel,
        })
    }

    /// Summary statistics over the loaded datasets.
    #[must_use]
    pub fn stats(&self, data: &Datasets) -> DatasetStats {
        let first_sample = data.iteration.iter().map(|it| it.timestamp).min();
        let last_sample = data.iteration.iter().map(|it| it.timestamp).max();

        let db_size_bytes = if self.path.to_string_lossy() == ":memory:" {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        DatasetStats {
            iteration_rows: data.iteration.len(),
            plate_box_rows: data.plate_box.row_count(),
            run_parameters_rows: data.run_parameters.row_count(),
            travel_rows: data.travel.row_count(),
            distinct_travels: data.travel_ids().len(),
            first_sample,
            last_sample,
            db_size_bytes,
        }
    }

    /// Fail with `DataUnavailable` unless all four tables exist.
    fn ensure_tables(&self) -> Result<()> {
        for table in DATASET_TABLES {
            let count: i32 = self
                .conn
                .query_row(TABLE_EXISTS, [table], |row| row.get(0))?;
            if count == 0 {
                return Err(Error::data_unavailable(
                    &self.path,
                    format!("no such table: {table}"),
                ));
            }
        }
        Ok(())
    }

    /// Load the `iteration` table as typed rows.
    fn load_iterations(&self) -> Result<Vec<Iteration>> {
        let mut stmt = self.conn.prepare(&select_all(ITERATION_TABLE))?;
        let mut rows = stmt.query([])?;

        let mut iterations = Vec::new();
        while let Some(row) = rows.next()? {
            iterations.push(Self::row_to_iteration(row)?);
        }

        debug!("Loaded {} iteration rows", iterations.len());
        Ok(iterations)
    }

    /// Load any table verbatim, preserving column names and cell types.
    fn load_table(&self, name: &str) -> Result<Table> {
        let mut stmt = self.conn.prepare(&select_all(name))?;
        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect();
        let column_count = columns.len();

        let mut query_rows = stmt.query([])?;
        let mut rows = Vec::new();
        while let Some(row) = query_rows.next()? {
            let mut cells = Vec::with_capacity(column_count);
            for index in 0..column_count {
                let value: rusqlite::types::Value = row.get(index)?;
                cells.push(value.into());
            }
            rows.push(cells);
        }

        debug!("Loaded table '{}' with {} rows", name, rows.len());
        Ok(Table {
            name: name.to_string(),
            columns,
            rows,
        })
    }

    /// Convert a database row to an [`Iteration`].
    fn row_to_iteration(row: &rusqlite::Row) -> Result<Iteration> {
        Ok(Iteration {
            travel_id: required_i64(row, "travel_id")?,
            timestamp: required_timestamp(row, "timestamp")?,
            latitude: required_f64(row, "latitude")?,
            longitude: required_f64(row, "longitude")?,
            distance: required_f64(row, "distance")?,
            speed: required_f64(row, "speed")?,
            status: IterationStatus::parse(&required_text(row, "status")?),
        })
    }
}

/// A non-null integer cell, or `MalformedRow`.
fn required_i64(row: &rusqlite::Row, column: &'static str) -> Result<i64> {
    match row.get::<_, Option<i64>>(column) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("null {column}"),
        )),
        Err(source) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("{column}: {source}"),
        )),
    }
}

/// A non-null float cell, or `MalformedRow`. Integer cells are widened.
fn required_f64(row: &rusqlite::Row, column: &'static str) -> Result<f64> {
    match row.get::<_, Option<f64>>(column) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("null {column}"),
        )),
        Err(source) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("{column}: {source}"),
        )),
    }
}

/// A non-null text cell, or `MalformedRow`.
fn required_text(row: &rusqlite::Row, column: &'static str) -> Result<String> {
    match row.get::<_, Option<String>>(column) {
        Ok(Some(value)) => Ok(value),
        Ok(None) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("null {column}"),
        )),
        Err(source) => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("{column}: {source}"),
        )),
    }
}

/// A timestamp cell, accepted as RFC 3339 text or integer Unix seconds.
///
/// The acquisition process is external, so both encodings occur in the
/// wild. Anything else is a malformed row, never silently defaulted.
fn required_timestamp(row: &rusqlite::Row, column: &'static str) -> Result<DateTime<Utc>> {
    let value = row.get_ref(column).map_err(|source| {
        Error::malformed_row(ITERATION_TABLE, format!("{column}: {source}"))
    })?;

    match value {
        ValueRef::Integer(secs) => Utc.timestamp_opt(secs, 0).single().ok_or_else(|| {
            Error::malformed_row(
                ITERATION_TABLE,
                format!("{column}: {secs} is out of range"),
            )
        }),
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|_| {
                Error::malformed_row(ITERATION_TABLE, format!("{column}: invalid UTF-8"))
            })?;
            DateTime::parse_from_rfc3339(text)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| {
                    Error::malformed_row(
                        ITERATION_TABLE,
                        format!("{column}: '{text}' is not RFC 3339"),
                    )
                })
        }
        ValueRef::Null => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("null {column}"),
        )),
        other => Err(Error::malformed_row(
            ITERATION_TABLE,
            format!("{column}: unexpected type {}", other.data_type()),
        )),
    }
}

/// Statistics about the loaded datasets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DatasetStats {
    /// Number of iteration rows.
    pub iteration_rows: usize,
    /// Number of plate-box rows.
    pub plate_box_rows: usize,
    /// Number of run-parameter rows.
    pub run_parameters_rows: usize,
    /// Number of travel rows.
    pub travel_rows: usize,
    /// Number of distinct travels referenced by iterations.
    pub distinct_travels: usize,
    /// Timestamp of the earliest sample.
    pub first_sample: Option<DateTime<Utc>>,
    /// Timestamp of the latest sample.
    pub last_sample: Option<DateTime<Utc>>,
    /// Size of the database file in bytes.
    pub db_size_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Schema matching what the radar's acquisition process writes.
    const FIXTURE_SCHEMA: &str = r"
    CREATE TABLE iteration (
        id INTEGER PRIMARY KEY,
        travel_id INTEGER NOT NULL,
        timestamp NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        distance REAL NOT NULL,
        speed REAL,
        status TEXT NOT NULL
    );
    CREATE TABLE plate_box (
        id INTEGER PRIMARY KEY,
        iteration_id INTEGER,
        x REAL, y REAL, width REAL, height REAL
    );
    CREATE TABLE run_parameters (
        id INTEGER PRIMARY KEY,
        name TEXT,
        value TEXT
    );
    CREATE TABLE travel (
        id INTEGER PRIMARY KEY,
        started_at TEXT
    );
    ";

    fn fixture_store(extra_sql: &str) -> Store {
        let conn = Connection::open_in_memory().expect("failed to open in-memory database");
        conn.execute_batch(FIXTURE_SCHEMA)
            .expect("failed to create fixture schema");
        if !extra_sql.is_empty() {
            conn.execute_batch(extra_sql).expect("failed to seed fixture");
        }
        Store::from_connection(conn)
    }

    fn seeded_store() -> Store {
        fixture_store(
            r"
            INSERT INTO travel (id, started_at) VALUES (1, '2024-05-01T08:00:00Z');
            INSERT INTO travel (id, started_at) VALUES (2, '2024-05-01T09:00:00Z');
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (1, '2024-05-01T08:00:00Z', 48.85, 2.35, 5.0, 10.0, 'Ok');
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (1, '2024-05-01T08:00:01Z', 48.86, 2.36, 3.0, 20.0, 'PlateDetected');
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (2, '2024-05-01T09:00:00Z', 48.90, 2.40, 1.0, 30.0, 'Ok');
            INSERT INTO plate_box (iteration_id, x, y, width, height)
            VALUES (2, 10.0, 20.0, 64.0, 32.0);
            INSERT INTO run_parameters (name, value) VALUES ('sensor_range_m', '120');
            ",
        )
    }

    #[test]
    fn test_open_missing_file_is_data_unavailable() {
        let err = Store::open("/nonexistent/radar.db").unwrap_err();
        assert!(err.is_data_unavailable());
    }

    #[test]
    fn test_load_all_tables() {
        let store = seeded_store();
        let data = store.load().unwrap();

        assert_eq!(data.iteration.len(), 3);
        assert_eq!(data.iteration_table.row_count(), 3);
        assert_eq!(data.plate_box.row_count(), 1);
        assert_eq!(data.run_parameters.row_count(), 1);
        assert_eq!(data.travel.row_count(), 2);
    }

    #[test]
    fn test_load_preserves_column_names() {
        let store = seeded_store();
        let data = store.load().unwrap();

        assert_eq!(
            data.plate_box.columns,
            vec!["id", "iteration_id", "x", "y", "width", "height"]
        );
        assert_eq!(data.run_parameters.columns, vec!["id", "name", "value"]);
    }

    #[test]
    fn test_load_typed_iterations() {
        let store = seeded_store();
        let data = store.load().unwrap();

        let first = &data.iteration[0];
        assert_eq!(first.travel_id, 1);
        assert!((first.latitude - 48.85).abs() < f64::EPSILON);
        assert!((first.distance - 5.0).abs() < f64::EPSILON);
        assert!(!first.has_plate_detection());

        assert!(data.iteration[1].has_plate_detection());
    }

    #[test]
    fn test_load_missing_table_is_data_unavailable() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE iteration (travel_id INTEGER, timestamp TEXT,
             latitude REAL, longitude REAL, distance REAL, speed REAL, status TEXT)",
        )
        .unwrap();
        let store = Store::from_connection(conn);

        let err = store.load().unwrap_err();
        assert!(err.is_data_unavailable());
        assert!(err.to_string().contains("no such table"));
    }

    #[test]
    fn test_null_speed_is_malformed_row() {
        let store = fixture_store(
            r"
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (1, '2024-05-01T08:00:00Z', 0.0, 0.0, 0.0, NULL, 'Ok');
            ",
        );

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn test_unparseable_timestamp_is_malformed_row() {
        let store = fixture_store(
            r"
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (1, 'last tuesday', 0.0, 0.0, 0.0, 10.0, 'Ok');
            ",
        );

        let err = store.load().unwrap_err();
        assert!(matches!(err, Error::MalformedRow { .. }));
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn test_integer_timestamp_accepted() {
        let store = fixture_store(
            r"
            INSERT INTO iteration (travel_id, timestamp, latitude, longitude, distance, speed, status)
            VALUES (1, 1714550400, 0.0, 0.0, 0.0, 10.0, 'Ok');
            ",
        );

        let data = store.load().unwrap();
        assert_eq!(
            data.iteration[0].timestamp,
            Utc.timestamp_opt(1_714_550_400, 0).unwrap()
        );
    }

    #[test]
    fn test_empty_tables_load_fine() {
        let store = fixture_store("");
        let data = store.load().unwrap();

        assert!(data.iteration.is_empty());
        assert!(data.plate_box.is_empty());
        assert!(data.travel_ids().is_empty());
    }

    #[test]
    fn test_null_cells_in_opaque_tables_pass_through() {
        let store = fixture_store(
            "INSERT INTO run_parameters (name, value) VALUES (NULL, NULL);",
        );
        let data = store.load().unwrap();

        assert_eq!(data.run_parameters.row_count(), 1);
        assert!(data.run_parameters.rows[0][1].is_null());
    }

    #[test]
    fn test_stats() {
        let store = seeded_store();
        let data = store.load().unwrap();
        let stats = store.stats(&data);

        assert_eq!(stats.iteration_rows, 3);
        assert_eq!(stats.plate_box_rows, 1);
        assert_eq!(stats.run_parameters_rows, 1);
        assert_eq!(stats.travel_rows, 2);
        assert_eq!(stats.distinct_travels, 2);
        assert!(stats.first_sample.is_some());
        assert!(stats.last_sample >= stats.first_sample);
        assert_eq!(stats.db_size_bytes, 0);
    }

    #[test]
    fn test_stats_empty() {
        let store = fixture_store("");
        let data = store.load().unwrap();
        let stats = store.stats(&data);

        assert_eq!(stats.iteration_rows, 0);
        assert!(stats.first_sample.is_none());
        assert!(stats.last_sample.is_none());
    }

    #[test]
    fn test_path() {
        let store = fixture_store("");
        assert_eq!(store.path().to_string_lossy(), ":memory:");
    }

    #[test]
    fn test_open_file_based() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("spangapp_test_{}.db", std::process::id()));

        // Seed a database with a writable connection first
        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(FIXTURE_SCHEMA).unwrap();
        }

        let store = Store::open(&db_path).unwrap();
        let data = store.load().unwrap();
        assert!(data.iteration.is_empty());
        assert_eq!(store.path(), db_path);

        let stats = store.stats(&data);
        assert!(stats.db_size_bytes > 0);

        drop(store);
        let _ = std::fs::remove_file(&db_path);
    }

    #[test]
    fn test_open_is_read_only() {
        let temp_dir = std::env::temp_dir();
        let db_path = temp_dir.join(format!("spangapp_ro_test_{}.db", std::process::id()));

        {
            let conn = Connection::open(&db_path).unwrap();
            conn.execute_batch(FIXTURE_SCHEMA).unwrap();
        }

        let store = Store::open(&db_path).unwrap();
        let result = store
            .conn
            .execute("INSERT INTO travel (id) VALUES (99)", []);
        assert!(result.is_err());

        drop(store);
        let _ = std::fs::remove_file(&db_path);
    }
}
