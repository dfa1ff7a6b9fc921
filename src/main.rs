//! Herdload CLI - Import unicorn-company CSV data into Postgres
//!
//! # Commands
//!
//! ```bash
//! herdload import                   # Import unicorns.csv into the database
//! herdload import --dry-run         # Validate and report without writing
//! herdload parse input.csv          # Just parse the CSV to JSON (debug)
//! ```
//!
//! The database URL comes from `--database-url` or the `DATABASE_URL`
//! environment variable (a `.env` file is honoured).

use clap::{Parser, Subcommand};
use herdload::{
    load_rows, run, run_and_close, ImportOptions, NullStore, PgUnicornStore, UnicornStore,
};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "herdload")]
#[command(about = "Import unicorn-company CSV data into Postgres", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clear the unicorns table and import every valid CSV row
    Import {
        /// Input CSV file
        #[arg(default_value = "unicorns.csv")]
        input: PathBuf,

        /// Postgres connection URL
        #[arg(long, env = "DATABASE_URL")]
        database_url: Option<String>,

        /// Validate and report without touching the database
        #[arg(long)]
        dry_run: bool,

        /// Skip running migrations before the import
        #[arg(long)]
        skip_migrations: bool,
    },

    /// Parse a CSV file and output the raw rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Import {
            input,
            database_url,
            dry_run,
            skip_migrations,
        } => cmd_import(&input, database_url.as_deref(), dry_run, skip_migrations).await,

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_import(
    input: &Path,
    database_url: Option<&str>,
    dry_run: bool,
    skip_migrations: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if dry_run {
        let report = run(&NullStore, input, ImportOptions { dry_run: true }).await?;
        eprintln!(
            "Dry run: {} rows parsed, {} valid, {} skipped",
            report.parsed, report.inserted, report.skipped
        );
        return Ok(());
    }

    let database_url = database_url
        .ok_or("DATABASE_URL is not set (use --database-url or a .env file)")?;

    let store = PgUnicornStore::connect(database_url).await?;

    // Release the connection on every fatal path, migration failure included.
    if !skip_migrations {
        if let Err(e) = store.migrate().await {
            store.close().await;
            return Err(e.into());
        }
    }

    let report = run_and_close(&store, input, ImportOptions::default()).await?;

    eprintln!(
        "Imported {} of {} rows ({} skipped, {} insert errors), {} companies in store",
        report.inserted,
        report.parsed,
        report.skipped,
        report.insert_errors,
        report.total_in_store.unwrap_or_default()
    );

    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing CSV: {}", input.display());

    let rows = load_rows(input)?;
    eprintln!("Parsed {} rows", rows.len());

    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)?;

    Ok(())
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
