/*! Sets up the application's SQLite database. */

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::{Error, transaction::create_transaction_table};

/// Create the application tables if they do not already exist.
///
/// Calling this on a database that has already been initialized is a no-op.
///
/// # Errors
/// Returns an error if the database could not be locked or there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
