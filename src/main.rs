//! DormDB CLI
//!
//! Loads rooms and students, runs the analytical queries and writes one
//! result file per query.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use dorm_db::export::OutputFormat;
use dorm_db::utils::{Logger, SystemClock};
use dorm_db::{Config, Lifecycle};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dorm_db", version)]
#[command(
    about = "Load rooms and students into SQLite and export occupancy and age analytics",
    long_about = None
)]
struct Cli {
    /// Path to the rooms file (*.json)
    #[arg(long)]
    rooms: PathBuf,

    /// Path to the students file (*.json)
    #[arg(long)]
    students: PathBuf,

    /// Output format: json or xml
    #[arg(long)]
    format: String,

    /// Clear the database after the results are written: y/n
    #[arg(long, value_enum)]
    dbc: YesNo,

    /// SQLite database file
    #[arg(long, default_value = dorm_db::config::DEFAULT_DATABASE)]
    db: PathBuf,

    /// Directory for result files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Delete existing rows before loading
    #[arg(long)]
    reset: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum YesNo {
    Y,
    N,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    Logger::init_with_level(Logger::level_for_verbosity(cli.verbose));

    // Rejected before any file or database is touched.
    let format: OutputFormat = cli.format.parse()?;

    let config = Config::new(cli.rooms, cli.students, format)
        .with_teardown(cli.dbc == YesNo::Y)
        .with_reset(cli.reset)
        .with_database(cli.db)
        .with_output_dir(cli.output_dir);

    let report = Lifecycle::new(&config, &SystemClock)
        .run()
        .with_context(|| format!("dorm_db run against {} failed", config.database.display()))?;

    println!(
        "Loaded {} room(s) and {} student(s).",
        report.loaded.rooms, report.loaded.students
    );
    for (query, path) in &report.outputs {
        println!("{} output file path: {}", query, path.display());
    }
    if report.torn_down {
        println!("Database cleared.");
    }

    Ok(())
}
