use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use time::Month;

use crate::{
    Error,
    transaction::{TransactionRecord, TransactionStore},
};

/// A store that hands out the next dataset in line on every read, as if a seed
/// had replaced the records between reads.
pub(crate) struct ShiftingStore {
    datasets: Mutex<Vec<Vec<TransactionRecord>>>,
    reads: AtomicUsize,
}

impl ShiftingStore {
    /// Reads return `datasets` in order and then keep returning the last one.
    pub(crate) fn new(datasets: Vec<Vec<TransactionRecord>>) -> Self {
        Self {
            datasets: Mutex::new(datasets),
            reads: AtomicUsize::new(0),
        }
    }

    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TransactionStore for ShiftingStore {
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<usize, Error> {
        let count = records.len();
        *self.datasets.lock().map_err(|_| Error::DatabaseLockError)? = vec![records];
        Ok(count)
    }

    fn records_in_month(&self, month: Option<Month>) -> Result<Vec<TransactionRecord>, Error> {
        let mut datasets = self.datasets.lock().map_err(|_| Error::DatabaseLockError)?;
        self.reads.fetch_add(1, Ordering::SeqCst);

        let records = if datasets.len() > 1 {
            datasets.remove(0)
        } else {
            datasets.first().cloned().unwrap_or_default()
        };

        Ok(records
            .into_iter()
            .filter(|record| month.is_none_or(|month| record.month() == month))
            .collect())
    }

    fn count(&self) -> Result<usize, Error> {
        let datasets = self.datasets.lock().map_err(|_| Error::DatabaseLockError)?;
        Ok(datasets.first().map_or(0, Vec::len))
    }
}

/// A store whose reads always fail.
pub(crate) struct FailingStore;

impl TransactionStore for FailingStore {
    fn replace_all(&self, _records: Vec<TransactionRecord>) -> Result<usize, Error> {
        Err(Error::DatabaseLockError)
    }

    fn records_in_month(&self, _month: Option<Month>) -> Result<Vec<TransactionRecord>, Error> {
        Err(Error::DatabaseLockError)
    }

    fn count(&self) -> Result<usize, Error> {
        Err(Error::DatabaseLockError)
    }
}
