//! Database schema management
//!
//! Two tables: `rooms` and `students`, with `students.room_id` referencing
//! `rooms.id`. Creation is idempotent, so the schema can be ensured against
//! a database that was provisioned by an earlier run.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::database::Schema;
//! use rusqlite::Connection;
//!
//! let conn = Connection::open_in_memory()?;
//! let schema = Schema::new();
//! schema.ensure(&conn)?;
//! schema.ensure(&conn)?;
//! assert_eq!(schema.existing_tables(&conn)?, vec!["rooms", "students"]);
//! # Ok::<(), dorm_db::Error>(())
//! ```

use crate::error::Result;
use rusqlite::Connection;

/// Table definitions, in creation order
///
/// `rooms` precedes `students` because of the foreign key.
const TABLES: &[(&str, &str)] = &[
    (
        "rooms",
        "CREATE TABLE IF NOT EXISTS rooms (
            id   INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        )",
    ),
    (
        "students",
        "CREATE TABLE IF NOT EXISTS students (
            id       INTEGER PRIMARY KEY,
            name     TEXT NOT NULL,
            birthday TEXT NOT NULL,
            sex      TEXT NOT NULL CHECK (sex IN ('M', 'F')),
            room_id  INTEGER NOT NULL REFERENCES rooms (id)
        )",
    ),
];

/// Database schema
#[derive(Debug, Clone, Default)]
pub struct Schema;

impl Schema {
    /// Create a new schema handle
    pub fn new() -> Self {
        Self
    }

    /// Names of the tables this schema owns
    pub fn table_names(&self) -> Vec<&'static str> {
        TABLES.iter().map(|(name, _)| *name).collect()
    }

    /// Create every table that does not exist yet
    pub fn ensure(&self, conn: &Connection) -> Result<()> {
        for (name, ddl) in TABLES {
            log::debug!("Ensuring table {}", name);
            conn.execute(ddl, [])?;
        }
        log::info!("Schema ready: {}", self.table_names().join(", "));
        Ok(())
    }

    /// Schema tables present in the database, sorted by name
    pub fn existing_tables(&self, conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name IN ('rooms', 'students')
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
