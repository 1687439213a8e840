//! Load an event CSV file into PostgreSQL in fixed-size batches.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use ortho_config::OrthoConfig;
use planet::config::{DatabaseSettings, LoaderSettings};
use planet::domain::BatchLoader;
use planet::domain::ports::EventStore;
use planet::outbound::CsvRecordSource;
use planet::outbound::persistence::{DbPool, DieselEventStore, PoolConfig};
use planet::telemetry::init_tracing;
use tokio::runtime::Builder;
use tracing::info;

/// `load-events` command arguments. Unset flags fall back to `LOADER_*` and
/// `POSTGRES_*` settings.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "load-events",
    about = "Validate event records from a CSV file and insert them in batches",
    version
)]
struct CliArgs {
    /// Path to the CSV input file.
    #[arg(long = "file", value_name = "path")]
    file: Option<PathBuf>,
    /// Valid records per insert statement.
    #[arg(long = "batch-size", value_name = "n")]
    batch_size: Option<usize>,
    /// Database connection URL overriding the `POSTGRES_*` settings.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Emit JSON log lines.
    #[arg(long = "json-logs")]
    json_logs: bool,
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

fn load_settings() -> io::Result<(LoaderSettings, DatabaseSettings)> {
    let program = [OsString::from("load-events")];
    let loader = LoaderSettings::load_from_iter(program.clone())
        .map_err(|error| io::Error::other(format!("load loader settings: {error}")))?;
    let database = DatabaseSettings::load_from_iter(program)
        .map_err(|error| io::Error::other(format!("load database settings: {error}")))?;
    Ok((loader, database))
}

fn resolve_database_url(
    explicit: Option<String>,
    settings: &DatabaseSettings,
) -> io::Result<String> {
    match explicit {
        Some(value) if value.trim().is_empty() => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "--database-url must not be empty when provided",
        )),
        Some(value) => Ok(value),
        None => Ok(settings.connection_url()),
    }
}

fn apply_flags(settings: LoaderSettings, args: &CliArgs) -> LoaderSettings {
    LoaderSettings {
        file_path: args.file.clone().unwrap_or(settings.file_path),
        batch_size: args.batch_size.unwrap_or(settings.batch_size),
    }
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    init_tracing(args.json_logs);

    let (settings, database) = load_settings()?;
    let settings = apply_flags(settings, &args);
    let batch_size = settings
        .batch_size()
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    let file_path = settings.file_path;

    let database_url = resolve_database_url(args.database_url, &database)?;
    let pool = DbPool::connect_lazy(PoolConfig::single(database_url));
    let store = Arc::new(DieselEventStore::new(pool));

    store
        .create_schema()
        .await
        .map_err(|error| io::Error::other(format!("create event table: {error}")))?;

    let mut source = CsvRecordSource::open(&file_path)?;
    info!(path = %file_path.display(), %batch_size, "loading events");

    let summary = BatchLoader::with_tracing(store)
        .load(&mut source, batch_size)
        .await
        .map_err(|error| io::Error::other(format!("load failed: {error}")))?;

    println!("records_read={}", summary.records_read);
    println!("records_rejected={}", summary.records_rejected);
    println!("records_unreadable={}", summary.records_unreadable);
    println!("batches_flushed={}", summary.batches_flushed);
    println!("batches_failed={}", summary.batches_failed);
    println!("rows_inserted={}", summary.rows_inserted);

    Ok(())
}
