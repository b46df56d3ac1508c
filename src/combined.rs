//! The combined view: transactions, sales totals and both histograms for a
//! month in a single response.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    params::{ListParams, extract},
    statistics::{
        CategoryCount, MonthStatistics, PriceRangeCount, bucket_prices, summarize_sales,
        tally_categories,
    },
    transaction::{
        PageRequest, TransactionFilter, TransactionPage, TransactionRecord, page_records,
    },
};

/// Everything the dashboard shows for a month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedView {
    /// The requested page of matching transactions.
    pub transactions: Vec<TransactionRecord>,
    /// The sales totals for the month.
    pub statistics: MonthStatistics,
    /// The price range histogram for the month.
    pub price_range_histogram: Vec<PriceRangeCount>,
    /// The category histogram for the month.
    pub category_histogram: Vec<CategoryCount>,
}

/// Query the transactions page, sales totals and histograms concurrently.
///
/// The month's records are read from the store once and every part of the
/// view is computed from that one snapshot, so a seed that lands mid-request
/// cannot mix two datasets. The totals and histograms cover the whole month;
/// only the transactions are narrowed by the search text and paged.
///
/// # Errors
/// Fails as soon as the store read or any of the four computations fails.
pub(crate) async fn query_month(
    state: &AppState,
    filter: TransactionFilter,
    page: PageRequest,
) -> Result<(TransactionPage, CombinedView), Error> {
    let month = filter.month();
    let records = Arc::new(
        state
            .with_store(move |store| store.records_in_month(month))
            .await?,
    );

    let (transactions, statistics, price_ranges, categories) = tokio::try_join!(
        on_snapshot(&records, move |records| page_records(records, &filter, page)),
        on_snapshot(&records, summarize_sales),
        on_snapshot(&records, bucket_prices),
        on_snapshot(&records, tally_categories),
    )?;

    let view = CombinedView {
        transactions: transactions.items.clone(),
        statistics,
        price_range_histogram: price_ranges,
        category_histogram: categories,
    };

    Ok((transactions, view))
}

/// Run `compute` over the shared `records` on Tokio's blocking thread pool.
async fn on_snapshot<T, F>(records: &Arc<Vec<TransactionRecord>>, compute: F) -> Result<T, Error>
where
    F: FnOnce(&[TransactionRecord]) -> T + Send + 'static,
    T: Send + 'static,
{
    let records = records.clone();

    tokio::task::spawn_blocking(move || compute(records.as_slice()))
        .await
        .inspect_err(|error| tracing::error!("combined view task failed: {error}"))
        .map_err(|error| Error::TaskFailed(error.to_string()))
}

/// Build the [CombinedView] for `filter` and `page`.
///
/// # Errors
/// Fails as soon as any of the underlying queries fails.
pub async fn combined_view(
    state: &AppState,
    filter: TransactionFilter,
    page: PageRequest,
) -> Result<CombinedView, Error> {
    query_month(state, filter, page).await.map(|(_, view)| view)
}

/// Return the [CombinedView] for the `month`, `search`, `page` and `perPage`
/// query parameters.
pub async fn get_combined(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<CombinedView>, Error> {
    let (filter, page) = extract(query)?.validate(&state.pagination_config)?;

    combined_view(&state, filter, page)
        .await
        .inspect_err(|error| tracing::error!("could not build combined view: {error}"))
        .map(Json)
}
