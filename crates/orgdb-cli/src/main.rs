//! orgdb CLI
//!
//! Command-line interface over the department and employee repos

use clap::{Parser, Subcommand, ValueEnum};
use orgdb_core::logging_facility::{self, Profile};
use orgdb_store::StoreConfig;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogMode {
    /// Human-readable logs on stderr
    Dev,
    /// JSON logs on stderr
    Json,
    Off,
}

#[derive(Debug, Parser)]
#[command(name = "orgdb")]
#[command(about = "orgdb - departments and employees in SQLite", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "ORGDB_DB", default_value = ".orgdb/company.db")]
    db: PathBuf,

    /// Let SQLite reject deleting departments that still have employees
    #[arg(long, global = true, env = "ORGDB_ENFORCE_FK")]
    enforce_foreign_keys: bool,

    #[arg(long, global = true, env = "ORGDB_LOG", value_enum, default_value_t = LogMode::Off)]
    log: LogMode,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or drop both tables
    Schema(commands::schema::SchemaArgs),
    /// Department operations
    Department(commands::department::DepartmentArgs),
    /// Employee operations
    Employee(commands::employee::EmployeeArgs),
    /// Rebuild both tables with the fixture data set
    Seed,
}

fn main() {
    let cli = Cli::parse();

    match cli.log {
        LogMode::Dev => logging_facility::init(Profile::Development),
        LogMode::Json => logging_facility::init(Profile::Production),
        LogMode::Off => {}
    }

    let ctx = commands::Context {
        config: StoreConfig::at_path(cli.db).with_foreign_keys(cli.enforce_foreign_keys),
        json: cli.json,
    };

    let result = match cli.command {
        Commands::Schema(args) => commands::schema::execute(&ctx, args),
        Commands::Department(args) => commands::department::execute(&ctx, args),
        Commands::Employee(args) => commands::employee::execute(&ctx, args),
        Commands::Seed => commands::seed::execute(&ctx),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
