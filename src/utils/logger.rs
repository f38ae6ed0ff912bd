//! Logging utilities
//!
//! This module wires the `log` facade to `env_logger`.
//!
//! # Example
//!
//! ```rust
//! use dorm_db::utils::Logger;
//!
//! Logger::init();
//! log::info!("Application started");
//! ```

use log::LevelFilter;

/// Logging utilities
pub struct Logger;

impl Logger {
    /// Initialize the logger at `warn`
    ///
    /// `RUST_LOG` still takes precedence when set.
    pub fn init() {
        Self::init_with_level(LevelFilter::Warn);
    }

    /// Initialize logger with custom log level
    ///
    /// Calling this more than once is harmless; later calls are ignored.
    ///
    /// # Arguments
    /// * `level` - Default log level filter
    pub fn init_with_level(level: LevelFilter) {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_millis()
            .try_init();
    }

    /// Map a `-v` count to a level filter
    ///
    /// 0 → warn, 1 → info, 2 or more → debug
    pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}
