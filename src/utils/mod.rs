//! Utilities module
//!
//! - `clock`: reference-date sources for age computation
//! - `logger`: `env_logger` setup
//!
//! # Example
//!
//! ```rust
//! use dorm_db::utils::{Clock, FixedClock, Logger};
//!
//! Logger::init();
//!
//! let clock = FixedClock(chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
//! assert_eq!(clock.today().to_string(), "2024-01-01");
//! ```

pub mod clock;
pub mod logger;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use logger::Logger;
