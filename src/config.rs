//! Run configuration
//!
//! Everything the lifecycle needs, already validated. The binary builds a
//! [`Config`] from command-line flags; tests build one directly.

use crate::export::OutputFormat;
use std::path::{Path, PathBuf};

/// Default database file, relative to the working directory
pub const DEFAULT_DATABASE: &str = "database.db";

/// Run configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rooms input file (JSON array)
    pub rooms: PathBuf,

    /// Students input file (JSON array)
    pub students: PathBuf,

    /// Output format for every query result
    pub format: OutputFormat,

    /// Delete all rows after a successful export
    pub teardown: bool,

    /// Delete existing rows before loading
    pub reset: bool,

    /// SQLite database file
    pub database: PathBuf,

    /// Directory the result files are written to
    pub output_dir: PathBuf,
}

impl Config {
    /// Configuration with default database, output directory and flags
    pub fn new(
        rooms: impl Into<PathBuf>,
        students: impl Into<PathBuf>,
        format: OutputFormat,
    ) -> Self {
        Self {
            rooms: rooms.into(),
            students: students.into(),
            format,
            teardown: false,
            reset: false,
            database: PathBuf::from(DEFAULT_DATABASE),
            output_dir: PathBuf::from("."),
        }
    }

    pub fn with_teardown(mut self, teardown: bool) -> Self {
        self.teardown = teardown;
        self
    }

    pub fn with_reset(mut self, reset: bool) -> Self {
        self.reset = reset;
        self
    }

    pub fn with_database(mut self, database: impl Into<PathBuf>) -> Self {
        self.database = database.into();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Where the result of the query named `name` is written
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(Path::new(name).with_extension(self.format.extension()))
    }
}
