//! Error types
//!
//! Every failure in the load/query/export pipeline is reported through
//! [`Error`]. Constraint violations raised by SQLite are mapped to the
//! integrity and duplicate-key variants so callers never have to inspect
//! raw engine codes.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Pipeline errors
#[derive(Debug, Error)]
pub enum Error {
    /// Input file missing, unreadable or malformed
    #[error("failed to parse input file {}: {reason}", path.display())]
    InputParse { path: PathBuf, reason: String },

    /// A student references a room that does not exist
    #[error("student {student_id} references missing room {room_id}")]
    Integrity { student_id: i64, room_id: i64 },

    /// A primary key was inserted twice
    #[error("duplicate {table} id {id}")]
    DuplicateKey { table: &'static str, id: i64 },

    /// Output format other than json or xml
    #[error("unsupported output format '{0}' (expected json or xml)")]
    UnsupportedFormat(String),

    /// Database could not be opened
    #[error("failed to open database {}: {source}", path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Any other engine failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Output file could not be written
    #[error("failed to write output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Result could not be serialized
    #[error("failed to serialize {format} output: {reason}")]
    Serialize { format: &'static str, reason: String },
}

/// Constraint classes the loader cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Constraint {
    ForeignKey,
    Duplicate,
}

/// Classify a SQLite constraint failure by its extended result code
pub(crate) fn constraint_of(err: &rusqlite::Error) -> Option<Constraint> {
    use rusqlite::ffi;

    let rusqlite::Error::SqliteFailure(e, _) = err else {
        return None;
    };
    if e.code != rusqlite::ErrorCode::ConstraintViolation {
        return None;
    }

    match e.extended_code {
        ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
        ffi::SQLITE_CONSTRAINT_PRIMARYKEY
        | ffi::SQLITE_CONSTRAINT_UNIQUE
        | ffi::SQLITE_CONSTRAINT_ROWID => Some(Constraint::Duplicate),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_constraint_of_duplicate_and_foreign_key() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE p (id INTEGER PRIMARY KEY);
             CREATE TABLE c (id INTEGER PRIMARY KEY, p_id INTEGER REFERENCES p(id));
             INSERT INTO p VALUES (1);",
        )
        .unwrap();

        let dup = conn.execute("INSERT INTO p VALUES (1)", []).unwrap_err();
        assert_eq!(constraint_of(&dup), Some(Constraint::Duplicate));

        let fk = conn.execute("INSERT INTO c VALUES (1, 42)", []).unwrap_err();
        assert_eq!(constraint_of(&fk), Some(Constraint::ForeignKey));

        let other = conn.execute("INSERT INTO missing VALUES (1)", []).unwrap_err();
        assert_eq!(constraint_of(&other), None);
    }

    #[test]
    fn test_error_messages() {
        let err = Error::Integrity {
            student_id: 7,
            room_id: 99,
        };
        assert_eq!(err.to_string(), "student 7 references missing room 99");

        let err = Error::UnsupportedFormat("csv".to_string());
        assert!(err.to_string().contains("csv"));
    }
}
