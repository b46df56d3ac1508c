use std::{
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use sales_dashboard::{
    AppState, DEFAULT_SEED_URI, InMemoryTransactionStore, PaginationConfig,
    SQLiteTransactionStore, SeedSource, TransactionStore, build_router, graceful_shutdown,
    initialize_db, logging_middleware,
};

/// The HTTP server for the sales dashboard.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the application SQLite database. The records are kept in
    /// memory if omitted.
    #[arg(long)]
    db_path: Option<String>,

    /// The address to serve the app from.
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Where `/initialize` loads the transactions from: an http(s) URL, a
    /// file:// URI or a file path.
    #[arg(long, default_value = DEFAULT_SEED_URI)]
    seed_uri: String,

    /// Load the transactions from the seed URI before accepting requests.
    #[arg(long)]
    seed_on_start: bool,

    /// How long to wait for the seed data to download, in seconds.
    #[arg(long, default_value_t = 30)]
    seed_timeout_secs: u64,

    /// The number of transactions per page when a request does not say.
    #[arg(long, default_value_t = 10)]
    page_size: u64,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::new(args.host, args.port);

    let store: Arc<dyn TransactionStore> = match &args.db_path {
        Some(db_path) => {
            let conn = Connection::open(db_path).expect("Could not open the database.");
            initialize_db(&conn).expect("Could not initialize the database.");
            Arc::new(SQLiteTransactionStore::new(Arc::new(Mutex::new(conn))))
        }
        None => Arc::new(InMemoryTransactionStore::new()),
    };

    let seed_source =
        SeedSource::from_uri(&args.seed_uri, Duration::from_secs(args.seed_timeout_secs))
            .expect("Invalid seed URI.");

    let pagination_config = PaginationConfig {
        default_page_size: args.page_size,
        ..Default::default()
    };
    assert!(
        (1..=pagination_config.max_page_size).contains(&pagination_config.default_page_size),
        "The page size must be between 1 and {}",
        pagination_config.max_page_size
    );

    let state = AppState::new(store, seed_source, pagination_config);

    if args.seed_on_start {
        match state.seed().await {
            Ok(inserted) => tracing::info!("Seeded {inserted} transactions on start up"),
            Err(error) => tracing::error!("Could not seed on start up: {error}"),
        }
    }

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(state).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly.");
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
