//! PageDB Shell Binary
//!
//! Opens a table file and runs the interactive shell on stdin/stdout.

use std::io;
use std::path::PathBuf;

use clap::Parser;
use pagedb::config::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use pagedb::shell::Session;
use pagedb::{Config, Engine};
use tracing_subscriber::{fmt, EnvFilter};

/// PageDB Shell
#[derive(Parser, Debug)]
#[command(name = "pagedb")]
#[command(about = "Minimal paged row store with an insert/select shell")]
#[command(version)]
struct Args {
    /// Database file (positional form)
    #[arg(value_name = "FILE", conflicts_with = "db")]
    file: Option<PathBuf>,

    /// Database file
    #[arg(long)]
    db: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long)]
    debug: bool,

    /// Number of page slots in the table
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: usize,

    /// Page size in bytes
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

fn main() {
    let args = Args::parse();

    // Initialize tracing/logging; stdout belongs to the shell
    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let db_path = args
        .file
        .or(args.db)
        .unwrap_or_else(|| Config::default().db_path);

    tracing::info!("PageDB v{}", pagedb::VERSION);
    tracing::info!("Database file: {}", db_path.display());

    // Build config from args
    let config = Config::builder()
        .db_path(&db_path)
        .max_pages(args.max_pages)
        .page_size(args.page_size)
        .build();

    // Open engine
    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open table: {}", e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = Session::new(engine, stdin.lock(), stdout.lock());

    if let Err(e) = session.run() {
        tracing::error!("Session error: {}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
