//! Query executor
//!
//! Runs the catalog queries against a connection and collects the rows into
//! a [`QueryResult`]. No row-level computation happens here; the executor
//! only binds the reference date and copies values out.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::database::Database;
//! use dorm_db::query::{Query, QueryEngine};
//! use dorm_db::utils::SystemClock;
//!
//! let db = Database::open_in_memory()?;
//! db.ensure_schema()?;
//!
//! let engine = QueryEngine::new(db.conn(), &SystemClock);
//! let occupancy = engine.run(Query::RoomOccupancy)?;
//! assert!(occupancy.is_empty());
//! # Ok::<(), dorm_db::Error>(())
//! ```

use crate::error::Result;
use crate::query::catalog::Query;
use crate::types::{QueryResult, Row, Value};
use crate::utils::Clock;
use chrono::NaiveDate;
use rusqlite::{named_params, Connection};

/// Query engine
///
/// Read-only; borrows the connection for its lifetime.
#[derive(Debug)]
pub struct QueryEngine<'c> {
    conn: &'c Connection,

    /// Date ages are measured against
    today: NaiveDate,
}

impl<'c> QueryEngine<'c> {
    /// Create an engine that reads "today" from `clock` once
    pub fn new(conn: &'c Connection, clock: &dyn Clock) -> Self {
        Self {
            conn,
            today: clock.today(),
        }
    }

    /// Reference date used for ages
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Execute one query
    pub fn run(&self, query: Query) -> Result<QueryResult> {
        log::info!("Running query {}", query);
        log::debug!("{}", query.sql().trim());

        let mut stmt = self.conn.prepare(query.sql())?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let today = self.today.format("%Y-%m-%d").to_string();

        let mut rows = if query.uses_reference_date() {
            stmt.query(named_params! { ":today": today })?
        } else {
            stmt.query([])?
        };

        let mut result = QueryResult::new(columns);
        while let Some(row) = rows.next()? {
            let values = (0..result.columns.len())
                .map(|i| row.get_ref(i).map(Value::from))
                .collect::<rusqlite::Result<Vec<_>>>()?;
            result.add_row(Row::new(values));
        }

        log::info!("Query {} returned {} row(s)", query, result.num_rows());
        Ok(result)
    }

    /// Execute every query in report order
    ///
    /// Stops at the first failure.
    pub fn run_all(&self) -> Result<Vec<(Query, QueryResult)>> {
        Query::ALL
            .into_iter()
            .map(|query| self.run(query).map(|result| (query, result)))
            .collect()
    }

    /// Student count per room, by room id
    pub fn room_occupancy(&self) -> Result<QueryResult> {
        self.run(Query::RoomOccupancy)
    }

    /// Up to five rooms with the lowest average age
    pub fn lowest_average_age(&self) -> Result<QueryResult> {
        self.run(Query::LowestAverageAge)
    }

    /// Up to five rooms with the largest age gap
    pub fn largest_age_gap(&self) -> Result<QueryResult> {
        self.run(Query::LargestAgeGap)
    }

    /// Rooms with both sexes present, by room id
    pub fn mixed_sex_rooms(&self) -> Result<QueryResult> {
        self.run(Query::MixedSexRooms)
    }
}
