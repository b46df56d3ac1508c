//! Sales Dashboard is a web app for exploring a dataset of product transactions.
//!
//! The library seeds a record store from a remote JSON dataset, then serves
//! JSON endpoints for searching transactions and computing monthly statistics,
//! plus a single dashboard page that charts the results.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde::{Deserialize, Serialize};
use tokio::signal;

mod app_state;
mod combined;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod logging;
mod pagination;
mod params;
mod routing;
mod seed;
mod statistics;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use combined::{CombinedView, combined_view};
pub use database_id::{DatabaseId, TransactionId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use seed::{DEFAULT_SEED_URI, SeedSource, SeedSummary, parse_seed_records, seed_from_source};
pub use statistics::{
    CategoryCount, MonthStatistics, PriceRangeCount, category_histogram, month_statistics,
    price_range_histogram,
};
pub use transaction::{
    InMemoryTransactionStore, PageRequest, SQLiteTransactionStore, TransactionFilter,
    TransactionPage, TransactionRecord, TransactionRecordBuilder, TransactionStore,
    list_transactions,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The month query parameter was not a number from 1 to 12.
    #[error("invalid month \"{0}\", expected a number from 1 to 12")]
    InvalidMonth(String),

    /// The page query parameter was not a whole number of at least 1.
    ///
    /// Pages are numbered from 1.
    #[error("invalid page \"{0}\", expected a whole number of at least 1")]
    InvalidPage(String),

    /// The page size query parameter was not a whole number between 1 and the
    /// configured maximum (the second field).
    #[error("invalid page size \"{0}\", expected a whole number from 1 to {1}")]
    InvalidPageSize(String, u64),

    /// The query string could not be decoded.
    #[error("could not parse the query string: {0}")]
    InvalidQuery(String),

    /// The seed data could not be retrieved from its source, e.g. the remote
    /// server was unreachable or returned an error status.
    #[error("could not fetch seed data: {0}")]
    SeedFetch(String),

    /// The seed data was retrieved but is not a valid list of transactions.
    #[error("seed data is malformed: {0}")]
    SeedFormat(String),

    /// The seed URI uses a scheme other than http, https or file.
    #[error("unsupported seed URI \"{0}\"")]
    UnsupportedSeedUri(String),

    /// Two records in one batch share an ID.
    #[error("duplicate transaction ID {0}")]
    DuplicateTransactionId(TransactionId),

    /// A record had a negative or non-finite price.
    #[error("transaction {0} has a negative or non-finite price")]
    InvalidPrice(TransactionId),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The route exists but does not accept the request's HTTP method.
    #[error("the HTTP method is not allowed for this resource")]
    MethodNotAllowed,

    /// The request body could not be read.
    #[error("could not read the request body: {0}")]
    RequestBody(String),

    /// A handler's response body could not be read back for logging.
    #[error("could not read the response body: {0}")]
    ResponseBody(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// A blocking task panicked or was cancelled before it finished.
    #[error("a background task failed: {0}")]
    TaskFailed(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

/// The JSON body sent to the client for every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// A machine readable error category, e.g. "validation_error".
    pub error: String,
    /// A human readable description of what went wrong.
    pub message: String,
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidMonth(_)
            | Error::InvalidPage(_)
            | Error::InvalidPageSize(_, _)
            | Error::InvalidQuery(_)
            | Error::RequestBody(_) => StatusCode::BAD_REQUEST,
            Error::SeedFetch(_)
            | Error::SeedFormat(_)
            | Error::DuplicateTransactionId(_)
            | Error::InvalidPrice(_) => StatusCode::BAD_GATEWAY,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Error::UnsupportedSeedUri(_)
            | Error::ResponseBody(_)
            | Error::SqlError(_)
            | Error::DatabaseLockError
            | Error::TaskFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self.status_code() {
            StatusCode::BAD_REQUEST => "validation_error",
            StatusCode::BAD_GATEWAY => "upstream_seed_failure",
            StatusCode::NOT_FOUND => "not_found",
            StatusCode::METHOD_NOT_ALLOWED => "method_not_allowed",
            _ => "internal_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
            // Internal details are only meant for the server logs.
            tracing::error!("An unexpected error occurred: {}", self);
            "An unexpected error occurred, check the server logs for more details.".to_owned()
        } else {
            tracing::debug!("Responding with {status}: {self}");
            self.to_string()
        };

        let body = ErrorBody {
            error: self.kind().to_owned(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
