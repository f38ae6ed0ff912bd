//! Data loader
//!
//! Reads room and student records from JSON files and bulk-inserts them.
//!
//! # Example
//!
//! ```rust,no_run
//! use dorm_db::database::{Database, DataLoader};
//!
//! let mut db = Database::open("database.db")?;
//! db.ensure_schema()?;
//!
//! let loader = DataLoader::new();
//! let rooms = loader.read_rooms("rooms.json")?;
//! let students = loader.read_students("students.json")?;
//! loader.load(&mut db, &rooms, &students)?;
//! # Ok::<(), dorm_db::Error>(())
//! ```

use crate::database::storage::Database;
use crate::error::{constraint_of, Constraint, Error, Result};
use crate::types::{Room, Student};
use rusqlite::params;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Counts of inserted rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub rooms: usize,
    pub students: usize,
}

/// Data loader
#[derive(Debug, Clone, Default)]
pub struct DataLoader;

impl DataLoader {
    /// Create a new data loader
    pub fn new() -> Self {
        Self
    }

    /// Read a JSON array of rooms
    pub fn read_rooms(&self, path: impl AsRef<Path>) -> Result<Vec<Room>> {
        let rooms: Vec<Room> = read_json_array(path.as_ref())?;
        log::info!("Parsed {} room(s) from {}", rooms.len(), path.as_ref().display());
        Ok(rooms)
    }

    /// Read a JSON array of students
    pub fn read_students(&self, path: impl AsRef<Path>) -> Result<Vec<Student>> {
        let students: Vec<Student> = read_json_array(path.as_ref())?;
        log::info!(
            "Parsed {} student(s) from {}",
            students.len(),
            path.as_ref().display()
        );
        Ok(students)
    }

    /// Insert rooms, then students, in a single transaction
    ///
    /// Nothing is kept if any row fails.
    ///
    /// # Returns
    /// `Err(Error::Integrity)` when a student names a missing room,
    /// `Err(Error::DuplicateKey)` when an id is already present
    pub fn load(
        &self,
        database: &mut Database,
        rooms: &[Room],
        students: &[Student],
    ) -> Result<LoadSummary> {
        let tx = database.conn_mut().transaction()?;

        {
            let mut insert = tx.prepare("INSERT INTO rooms (id, name) VALUES (?1, ?2)")?;
            for room in rooms {
                insert
                    .execute(params![room.id, room.name])
                    .map_err(|e| match constraint_of(&e) {
                        Some(Constraint::Duplicate) => Error::DuplicateKey {
                            table: "rooms",
                            id: room.id,
                        },
                        _ => Error::Database(e),
                    })?;
            }
        }
        log::info!("Inserted {} room(s)", rooms.len());

        {
            let mut insert = tx.prepare(
                "INSERT INTO students (id, name, birthday, sex, room_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for student in students {
                insert
                    .execute(params![
                        student.id,
                        student.name,
                        student.birthday_column(),
                        student.sex.as_str(),
                        student.room_id,
                    ])
                    .map_err(|e| match constraint_of(&e) {
                        Some(Constraint::ForeignKey) => Error::Integrity {
                            student_id: student.id,
                            room_id: student.room_id,
                        },
                        Some(Constraint::Duplicate) => Error::DuplicateKey {
                            table: "students",
                            id: student.id,
                        },
                        None => Error::Database(e),
                    })?;
            }
        }
        log::info!("Inserted {} student(s)", students.len());

        tx.commit()?;

        Ok(LoadSummary {
            rooms: rooms.len(),
            students: students.len(),
        })
    }
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let input_error = |reason: String| Error::InputParse {
        path: path.to_path_buf(),
        reason,
    };

    let file = File::open(path).map_err(|e| input_error(e.to_string()))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| input_error(e.to_string()))
}
