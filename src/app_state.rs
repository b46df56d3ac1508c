//! Implements a struct that holds the state of the REST server.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    Error,
    pagination::PaginationConfig,
    seed::{SeedSource, seed_from_source},
    transaction::TransactionStore,
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState {
    /// The store holding the transaction records.
    pub store: Arc<dyn TransactionStore>,

    /// Where `/initialize` loads the transaction records from.
    pub seed_source: SeedSource,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,

    /// Held while seeding so that concurrent seed requests run one at a time.
    seed_lock: Arc<Mutex<()>>,
}

impl AppState {
    /// Create a new [AppState].
    pub fn new(
        store: Arc<dyn TransactionStore>,
        seed_source: SeedSource,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            store,
            seed_source,
            pagination_config,
            seed_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Run `query` against the store on Tokio's blocking thread pool.
    ///
    /// # Errors
    /// Returns the error from `query`, or an [Error::TaskFailed] if the task
    /// panicked.
    pub async fn with_store<T, F>(&self, query: F) -> Result<T, Error>
    where
        F: FnOnce(&dyn TransactionStore) -> Result<T, Error> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();

        tokio::task::spawn_blocking(move || query(store.as_ref()))
            .await
            .inspect_err(|error| tracing::error!("store task failed: {error}"))
            .map_err(|error| Error::TaskFailed(error.to_string()))?
    }

    /// Replace the store's contents with the records from [AppState::seed_source].
    ///
    /// Only one seed runs at a time; later callers wait for the running seed
    /// to finish and then seed again.
    ///
    /// # Errors
    /// Returns an error if the source could not be read or parsed, or if the
    /// records could not be stored. The store keeps its previous contents.
    pub async fn seed(&self) -> Result<usize, Error> {
        let _guard = self.seed_lock.lock().await;

        seed_from_source(self.store.clone(), &self.seed_source).await
    }
}
