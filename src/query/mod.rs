//! Query processing module
//!
//! - `catalog`: the four fixed analytical queries and their SQL
//! - `executor`: runs catalog queries and collects tabular results
//!
//! # Workflow
//!
//! 1. **Pick**: choose a [`Query`] (or run all of them)
//! 2. **Bind**: the engine binds the reference date from its [`Clock`](crate::utils::Clock)
//! 3. **Execute**: SQLite groups, aggregates and orders
//! 4. **Collect**: rows are copied into a [`QueryResult`](crate::types::QueryResult)

pub mod catalog;
pub mod executor;

// Re-export main types for convenience
pub use catalog::{Query, TOP_N};
pub use executor::QueryEngine;
