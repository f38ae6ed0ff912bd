//! Index advisor
//!
//! Issues the index-creation statements that back the analytical queries:
//!
//! | Index                       | Columns             | Serves                                  |
//! |-----------------------------|---------------------|-----------------------------------------|
//! | `idx_students_room_id`      | `room_id`           | occupancy counts, room joins            |
//! | `idx_students_birthday`     | `birthday`          | average age and age gap                 |
//! | `idx_students_room_id_sex`  | `room_id, sex`      | distinct-sex count per room (covering)  |
//!
//! Indexes only change query cost, never results.

use crate::error::Result;
use rusqlite::Connection;

/// Index definition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDefinition {
    /// Index name
    pub name: &'static str,

    /// Indexed table
    pub table: &'static str,

    /// Indexed columns, in key order
    pub columns: &'static [&'static str],
}

impl IndexDefinition {
    /// `CREATE INDEX IF NOT EXISTS` statement for this index
    pub fn create_statement(&self) -> String {
        format!(
            "CREATE INDEX IF NOT EXISTS {} ON {} ({})",
            self.name,
            self.table,
            self.columns.join(", ")
        )
    }
}

/// Indexes created at setup
pub const INDEXES: &[IndexDefinition] = &[
    IndexDefinition {
        name: "idx_students_room_id",
        table: "students",
        columns: &["room_id"],
    },
    IndexDefinition {
        name: "idx_students_birthday",
        table: "students",
        columns: &["birthday"],
    },
    IndexDefinition {
        name: "idx_students_room_id_sex",
        table: "students",
        columns: &["room_id", "sex"],
    },
];

/// Index advisor
#[derive(Debug, Clone, Default)]
pub struct IndexAdvisor;

impl IndexAdvisor {
    pub fn new() -> Self {
        Self
    }

    /// Indexes this advisor manages
    pub fn definitions(&self) -> &'static [IndexDefinition] {
        INDEXES
    }

    /// Create every index that does not exist yet
    ///
    /// Requires the schema to be in place.
    pub fn ensure(&self, conn: &Connection) -> Result<()> {
        for index in INDEXES {
            let sql = index.create_statement();
            log::debug!("{}", sql);
            conn.execute(&sql, [])?;
        }
        log::info!("Created {} index(es) on students", INDEXES.len());
        Ok(())
    }

    /// Names of managed indexes present in the database, sorted
    pub fn existing(&self, conn: &Connection) -> Result<Vec<String>> {
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'index' AND name LIKE 'idx_students_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(names)
    }
}
