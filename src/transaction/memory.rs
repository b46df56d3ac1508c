//! An in-memory transaction store, used when no database file is configured
//! and as a lightweight store in tests.

use std::{
    collections::HashSet,
    sync::{Arc, RwLock},
};

use time::Month;

use crate::Error;

use super::{core::TransactionRecord, store::TransactionStore};

/// Keeps transaction records in a vector sorted by ID.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionStore {
    records: Arc<RwLock<Vec<TransactionRecord>>>,
}

impl InMemoryTransactionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for InMemoryTransactionStore {
    /// Validates every record before swapping them in, so a failed call leaves
    /// the store untouched.
    fn replace_all(&self, mut records: Vec<TransactionRecord>) -> Result<usize, Error> {
        let mut seen_ids = HashSet::with_capacity(records.len());

        for record in &records {
            if !record.price.is_finite() || record.price < 0.0 {
                return Err(Error::InvalidPrice(record.id));
            }

            if !seen_ids.insert(record.id) {
                return Err(Error::DuplicateTransactionId(record.id));
            }
        }

        records.sort_by_key(|record| record.id);
        let count = records.len();

        let mut stored = self
            .records
            .write()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;
        *stored = records;

        Ok(count)
    }

    fn records_in_month(&self, month: Option<Month>) -> Result<Vec<TransactionRecord>, Error> {
        let stored = self
            .records
            .read()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        Ok(stored
            .iter()
            .filter(|record| month.is_none_or(|month| record.month() == month))
            .cloned()
            .collect())
    }

    fn count(&self) -> Result<usize, Error> {
        self.records
            .read()
            .map(|stored| stored.len())
            .map_err(|_| Error::DatabaseLockError)
    }
}
