//! DormDB: room and student analytics on SQLite
//!
//! Loads room and student records into a two-table relational schema,
//! answers four fixed analytical queries in SQL and exports each result as
//! JSON or XML.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::database::{Database, DataLoader, IndexAdvisor};
//! use dorm_db::export::Exporter;
//! use dorm_db::query::{Query, QueryEngine};
//! use dorm_db::types::{Room, Sex, Student};
//! use dorm_db::utils::FixedClock;
//! use chrono::NaiveDate;
//!
//! let mut db = Database::open_in_memory()?;
//! db.ensure_schema()?;
//! IndexAdvisor::new().ensure(db.conn())?;
//!
//! let born = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
//! DataLoader::new().load(
//!     &mut db,
//!     &[Room::new(1, "A")],
//!     &[Student::new(1, "Alice", born, Sex::Female, 1)],
//! )?;
//!
//! let clock = FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! let occupancy = QueryEngine::new(db.conn(), &clock).run(Query::RoomOccupancy)?;
//! let json = Exporter::Json.serialize(Query::RoomOccupancy.name(), &occupancy)?;
//! assert!(String::from_utf8(json).unwrap().contains("\"count\": 1"));
//! # Ok::<(), dorm_db::Error>(())
//! ```

/// DormDB version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod lifecycle;
pub mod query;
pub mod types;
pub mod utils;

pub use config::Config;
pub use error::{Error, Result};
pub use lifecycle::{Lifecycle, RunReport};
