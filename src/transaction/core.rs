//! Defines the transaction record model and its database table.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::database_id::TransactionId;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// The columns of the `product_transaction` table in the order expected by
/// [map_transaction_row].
pub(super) const TRANSACTION_COLUMNS: &str =
    "id, title, description, category, price, date_of_sale, sold, image";

// ============================================================================
// MODELS
// ============================================================================

/// The sale (or listing) of a single product.
///
/// Records are created in bulk when the store is seeded and are read-only
/// afterwards. To create a new `TransactionRecord`, use [TransactionRecord::build].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// The ID of the record, unique within the store.
    pub id: TransactionId,
    /// The product name.
    pub title: String,
    /// A longer description of the product.
    pub description: String,
    /// The product category, e.g. "electronics".
    pub category: String,
    /// The listed price. Never negative.
    pub price: f64,
    /// The calendar date of the sale.
    #[serde(with = "iso_date")]
    pub date_of_sale: Date,
    /// Whether the product was sold.
    pub sold: bool,
    /// A URL to an image of the product. May be empty.
    #[serde(default)]
    pub image: String,
}

impl TransactionRecord {
    /// Start building a record.
    ///
    /// Shortcut for [TransactionRecordBuilder] for discoverability.
    pub fn build(
        id: TransactionId,
        title: &str,
        price: f64,
        date_of_sale: Date,
    ) -> TransactionRecordBuilder {
        TransactionRecordBuilder {
            id,
            title: title.to_owned(),
            description: String::new(),
            category: String::new(),
            price,
            date_of_sale,
            sold: false,
            image: String::new(),
        }
    }

    /// The calendar month the sale happened in, regardless of year.
    pub fn month(&self) -> Month {
        self.date_of_sale.month()
    }
}

/// A builder for creating [TransactionRecord] instances.
///
/// Optional fields default to an empty string, and `sold` defaults to `false`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecordBuilder {
    id: TransactionId,
    title: String,
    description: String,
    category: String,
    price: f64,
    date_of_sale: Date,
    sold: bool,
    image: String,
}

impl TransactionRecordBuilder {
    /// Set the product description.
    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    /// Set the product category.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }

    /// Set whether the product was sold.
    pub fn sold(mut self, sold: bool) -> Self {
        self.sold = sold;
        self
    }

    /// Set the product image URL.
    pub fn image(mut self, image: &str) -> Self {
        self.image = image.to_owned();
        self
    }

    /// Create the record.
    pub fn finish(self) -> TransactionRecord {
        TransactionRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            category: self.category,
            price: self.price,
            date_of_sale: self.date_of_sale,
            sold: self.sold,
            image: self.image,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the table for transaction records.
///
/// Dates are stored as ISO 8601 text so that the month can be extracted with
/// `strftime`.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product_transaction (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            price REAL NOT NULL CHECK (price >= 0),
            date_of_sale TEXT NOT NULL,
            sold INTEGER NOT NULL,
            image TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX IF NOT EXISTS idx_product_transaction_date_of_sale
            ON product_transaction(date_of_sale);",
    )
}

/// Map a database row selected with [TRANSACTION_COLUMNS] to a [TransactionRecord].
///
/// # Errors
/// Returns an error if a column cannot be converted into the corresponding rust type.
pub fn map_transaction_row(row: &Row) -> Result<TransactionRecord, rusqlite::Error> {
    Ok(TransactionRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        price: row.get(4)?,
        date_of_sale: row.get(5)?,
        sold: row.get(6)?,
        image: row.get(7)?,
    })
}
