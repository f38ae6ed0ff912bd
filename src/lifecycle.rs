//! Lifecycle controller
//!
//! Runs the whole pipeline, strictly in order:
//!
//! 1. Parse both input files (before any database access)
//! 2. Open the database
//! 3. Ensure schema, then indexes
//! 4. Optionally clear existing rows, then load
//! 5. Run every query
//! 6. Export every result to its own file
//! 7. Optionally tear down the loaded rows
//!
//! The first failure aborts everything after it. Result files are only
//! written once all queries have succeeded, and teardown only runs after a
//! complete export. The connection is dropped on every exit path.
//!
//! # Example
//!
//! ```rust,no_run
//! use dorm_db::{Config, Lifecycle};
//! use dorm_db::export::OutputFormat;
//! use dorm_db::utils::SystemClock;
//!
//! let config = Config::new("rooms.json", "students.json", OutputFormat::Json);
//! let report = Lifecycle::new(&config, &SystemClock).run()?;
//! for (query, path) in &report.outputs {
//!     println!("{}: {}", query, path.display());
//! }
//! # Ok::<(), dorm_db::Error>(())
//! ```

use crate::config::Config;
use crate::database::{DataLoader, Database, IndexAdvisor, LoadSummary};
use crate::error::Result;
use crate::export::Exporter;
use crate::query::{Query, QueryEngine};
use crate::types::{Room, Student};
use crate::utils::Clock;
use std::path::PathBuf;

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Rows inserted
    pub loaded: LoadSummary,

    /// Result file per query, in report order
    pub outputs: Vec<(Query, PathBuf)>,

    /// Whether rows were deleted after export
    pub torn_down: bool,
}

/// Lifecycle controller
pub struct Lifecycle<'a> {
    config: &'a Config,
    clock: &'a dyn Clock,
}

impl<'a> Lifecycle<'a> {
    pub fn new(config: &'a Config, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    /// Run every step; see the module docs for ordering
    pub fn run(&self) -> Result<RunReport> {
        let loader = DataLoader::new();

        log::info!("Reading input files");
        let rooms = loader.read_rooms(&self.config.rooms)?;
        let students = loader.read_students(&self.config.students)?;

        let mut database = Database::open(&self.config.database)?;
        self.run_with(&mut database, &rooms, &students)
    }

    /// Run every step after input parsing against an already open database
    pub fn run_with(
        &self,
        database: &mut Database,
        rooms: &[Room],
        students: &[Student],
    ) -> Result<RunReport> {
        log::info!("Preparing schema and indexes");
        database.ensure_schema()?;
        IndexAdvisor::new().ensure(database.conn())?;

        if self.config.reset {
            database.clear()?;
        }

        log::info!("Loading {} room(s) and {} student(s)", rooms.len(), students.len());
        let loaded = DataLoader::new()
            .load(database, rooms, students)
            .inspect_err(|e| log::error!("Failed to load data: {}", e))?;

        let results = QueryEngine::new(database.conn(), self.clock)
            .run_all()
            .inspect_err(|e| log::error!("Failed to run queries: {}", e))?;

        log::info!("Exporting results as {}", self.config.format);
        let exporter = Exporter::from(self.config.format);
        let mut outputs = Vec::with_capacity(results.len());
        for (query, result) in &results {
            let path = self.config.output_path(query.name());
            exporter
                .write_file(query.name(), result, &path)
                .inspect_err(|e| log::error!("Failed to export {}: {}", query, e))?;
            outputs.push((*query, path));
        }

        if self.config.teardown {
            database.clear()?;
        }

        Ok(RunReport {
            loaded,
            outputs,
            torn_down: self.config.teardown,
        })
    }
}
