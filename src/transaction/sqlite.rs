//! Implements a SQLite backed transaction store.

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, ffi};
use time::Month;

use crate::Error;

use super::{
    core::{TRANSACTION_COLUMNS, TransactionRecord, map_transaction_row},
    store::TransactionStore,
};

/// Stores transaction records in a SQLite database.
///
/// The `product_transaction` table must exist, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Replace the table contents inside a single SQL transaction.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateTransactionId] if two records share an ID,
    /// - [Error::InvalidPrice] if a record has a negative or non-finite price,
    /// - or [Error::SqlError] if there is some other SQL error.
    fn replace_all(&self, records: Vec<TransactionRecord>) -> Result<usize, Error> {
        let connection = self.lock()?;
        // Dropping `tx` without committing rolls back, keeping the old rows.
        let tx = connection.unchecked_transaction()?;

        tx.execute("DELETE FROM product_transaction", ())?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO product_transaction ({TRANSACTION_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"
            ))?;

            for record in &records {
                if !record.price.is_finite() {
                    return Err(Error::InvalidPrice(record.id));
                }

                stmt.execute((
                    record.id,
                    &record.title,
                    &record.description,
                    &record.category,
                    record.price,
                    record.date_of_sale,
                    record.sold,
                    &record.image,
                ))
                .map_err(|error| match error {
                    rusqlite::Error::SqliteFailure(
                        ffi::Error {
                            code: _,
                            extended_code: ffi::SQLITE_CONSTRAINT_PRIMARYKEY,
                        },
                        _,
                    ) => Error::DuplicateTransactionId(record.id),
                    rusqlite::Error::SqliteFailure(
                        ffi::Error {
                            code: _,
                            extended_code: ffi::SQLITE_CONSTRAINT_CHECK,
                        },
                        _,
                    ) => Error::InvalidPrice(record.id),
                    error => error.into(),
                })?;
            }
        }

        tx.commit()?;

        Ok(records.len())
    }

    /// # Errors
    /// Returns an [Error::SqlError] if there is an SQL error.
    fn records_in_month(&self, month: Option<Month>) -> Result<Vec<TransactionRecord>, Error> {
        let connection = self.lock()?;

        let records = match month {
            Some(month) => connection
                .prepare(&format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM product_transaction
                     WHERE CAST(strftime('%m', date_of_sale) AS INTEGER) = ?1
                     ORDER BY id ASC"
                ))?
                .query_map([u8::from(month)], map_transaction_row)?
                .collect::<Result<Vec<_>, rusqlite::Error>>()?,
            None => connection
                .prepare(&format!(
                    "SELECT {TRANSACTION_COLUMNS} FROM product_transaction ORDER BY id ASC"
                ))?
                .query_map([], map_transaction_row)?
                .collect::<Result<Vec<_>, rusqlite::Error>>()?,
        };

        Ok(records)
    }

    fn count(&self) -> Result<usize, Error> {
        let count: i64 = self.lock()?.query_row(
            "SELECT COUNT(*) FROM product_transaction",
            [],
            |row| row.get(0),
        )?;

        Ok(count as usize)
    }
}
