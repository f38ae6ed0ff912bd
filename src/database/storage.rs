//! Database storage layer
//!
//! [`Database`] owns the single SQLite connection used by a run. It is
//! opened once, handed by reference to the schema, index, loader and query
//! components, and closed when it goes out of scope.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::database::{Database, Table};
//!
//! let db = Database::open_in_memory()?;
//! db.ensure_schema()?;
//! assert_eq!(db.count_rows(Table::Rooms)?, 0);
//! # Ok::<(), dorm_db::Error>(())
//! ```

use crate::database::schema::Schema;
use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::Path;

/// Tables owned by the schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Rooms,
    Students,
}

impl Table {
    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Rooms => "rooms",
            Table::Students => "students",
        }
    }
}

/// Database handle
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database file
    ///
    /// # Returns
    /// `Err(Error::Connection)` if the file cannot be opened
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| Error::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Database connection established: {}", path.display());
        Self::configure(conn, path)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let path = Path::new(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| Error::Connection {
            path: path.to_path_buf(),
            source,
        })?;
        Self::configure(conn, path)
    }

    fn configure(conn: Connection, path: &Path) -> Result<Self> {
        // Referential integrity is off by default in SQLite.
        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|source| Error::Connection {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self { conn })
    }

    /// Borrow the underlying connection
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Mutably borrow the underlying connection (needed for transactions)
    pub fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Create tables if they do not exist
    pub fn ensure_schema(&self) -> Result<()> {
        Schema::new().ensure(&self.conn)
    }

    /// Number of rows currently in `table`
    pub fn count_rows(&self, table: Table) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    /// Delete every row, students before rooms
    ///
    /// Tables and indexes are left in place.
    pub fn clear(&mut self) -> Result<()> {
        log::info!("Clearing data from students and rooms tables");
        let tx = self.conn.transaction()?;
        let students = tx.execute("DELETE FROM students", [])?;
        let rooms = tx.execute("DELETE FROM rooms", [])?;
        tx.commit()?;
        log::info!("Removed {} student(s) and {} room(s)", students, rooms);
        Ok(())
    }
}
