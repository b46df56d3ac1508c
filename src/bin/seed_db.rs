use std::error::Error;
use std::path::Path;
use std::process::exit;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use rusqlite::Connection;

use sales_dashboard::{
    DEFAULT_SEED_URI, SQLiteTransactionStore, SeedSource, initialize_db, seed_from_source,
};

/// A utility for creating a SQLite database populated with the product
/// transactions dataset.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,

    /// Where to load the transactions from: an http(s) URL, a file:// URI or
    /// a file path.
    #[arg(long, default_value = DEFAULT_SEED_URI)]
    seed_uri: String,

    /// How long to wait for the seed data to download, in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,
}

/// Create a database and fill it with the seed dataset.
///
/// Running this against an existing database replaces its transactions.
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'sales.db').");
            exit(1);
        }
        _ => {}
    }

    let source = SeedSource::from_uri(&args.seed_uri, Duration::from_secs(args.timeout_secs))?;

    println!("Opening database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Loading transactions from {source}...");

    let store = Arc::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(conn))));
    let inserted = seed_from_source(store, &source).await?;

    println!("Success! Stored {inserted} transactions.");

    Ok(())
}
