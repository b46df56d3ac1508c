//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// The ID of a transaction record, taken verbatim from the seed dataset.
pub type TransactionId = DatabaseId;
