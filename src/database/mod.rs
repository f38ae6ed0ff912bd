//! Database management module
//!
//! The database management module consists of:
//! - `storage`: the connection handle, row counts and teardown
//! - `schema`: `rooms` / `students` table definitions
//! - `indexes`: index creation backing the analytical queries
//! - `loader`: JSON input parsing and bulk insertion
//!
//! # Example
//!
//! ```rust
//! use dorm_db::database::{Database, DataLoader, IndexAdvisor, Table};
//! use dorm_db::types::Room;
//!
//! let mut db = Database::open_in_memory()?;
//! db.ensure_schema()?;
//! IndexAdvisor::new().ensure(db.conn())?;
//!
//! DataLoader::new().load(&mut db, &[Room::new(1, "Room #1")], &[])?;
//! assert_eq!(db.count_rows(Table::Rooms)?, 1);
//! # Ok::<(), dorm_db::Error>(())
//! ```

pub mod indexes;
pub mod loader;
pub mod schema;
pub mod storage;

// Re-export main types for convenience
pub use indexes::{IndexAdvisor, IndexDefinition};
pub use loader::{DataLoader, LoadSummary};
pub use schema::Schema;
pub use storage::{Database, Table};
