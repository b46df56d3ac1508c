//! Loading seed data into a transaction store.

use std::sync::Arc;

use crate::{Error, transaction::TransactionStore};

use super::{records::parse_seed_records, source::SeedSource};

/// Fetch the records from `source` and replace the contents of `store` with
/// them, returning the number of records stored.
///
/// Seeding twice from the same source leaves the store with the same records.
///
/// # Errors
/// Returns an error if the source could not be read, the data could not be
/// parsed, or the records could not be stored. The store keeps its previous
/// contents on failure.
pub async fn seed_from_source(
    store: Arc<dyn TransactionStore>,
    source: &SeedSource,
) -> Result<usize, Error> {
    tracing::info!("Fetching seed data from {source}");

    let body = source
        .fetch()
        .await
        .inspect_err(|error| tracing::error!("Could not fetch seed data: {error}"))?;

    let records = parse_seed_records(&body)
        .inspect_err(|error| tracing::error!("Could not parse seed data: {error}"))?;

    let inserted = tokio::task::spawn_blocking(move || store.replace_all(records))
        .await
        .map_err(|error| Error::TaskFailed(error.to_string()))??;

    tracing::info!("Seeded {inserted} transactions from {source}");

    Ok(inserted)
}
