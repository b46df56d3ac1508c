//! Defines the transaction store trait.

use time::Month;

use crate::Error;

use super::core::TransactionRecord;

/// Handles the storage and retrieval of transaction records.
///
/// Records are written in bulk by the seed loader and only read afterwards,
/// so implementations need no locking beyond what keeps a bulk write atomic.
pub trait TransactionStore: Send + Sync {
    /// Remove every record in the store and insert `records` in their place.
    ///
    /// The replacement is atomic: if an error is returned the store still holds
    /// its previous contents.
    ///
    /// # Errors
    /// Returns an [Error::DuplicateTransactionId] if two records share an ID,
    /// an [Error::InvalidPrice] if a price is negative or not finite, or an
    /// implementation specific error if the records could not be written.
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<usize, Error>;

    /// Retrieve the records sold in `month` of any year, or every record when
    /// `month` is `None`.
    ///
    /// Records are returned in order of ascending ID.
    fn records_in_month(&self, month: Option<Month>) -> Result<Vec<TransactionRecord>, Error>;

    /// The number of records in the store.
    fn count(&self) -> Result<usize, Error>;
}
