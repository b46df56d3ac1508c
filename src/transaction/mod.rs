//! Transaction records and how to find them.
//!
//! This module contains:
//! - The `TransactionRecord` model and `TransactionRecordBuilder`
//! - The `TransactionStore` trait with SQLite and in-memory implementations
//! - The search and pagination logic behind the transactions endpoint

mod core;
mod endpoint;
mod memory;
mod query;
mod sqlite;
mod store;

pub use core::{TransactionRecord, TransactionRecordBuilder, create_transaction_table};
pub use endpoint::get_transactions;
pub use memory::InMemoryTransactionStore;
pub use query::{PageRequest, TransactionFilter, TransactionPage, list_transactions};
pub(crate) use query::page_records;
pub use sqlite::SQLiteTransactionStore;
pub use store::TransactionStore;
