//! Price range and category histograms for a month.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    transaction::{TransactionRecord, TransactionStore},
};

/// The width of each price range, except the open-ended last one.
const PRICE_RANGE_WIDTH: f64 = 100.0;

/// The labels of the price ranges, in ascending order of price.
const PRICE_RANGE_LABELS: [&str; 10] = [
    "0-100",
    "101-200",
    "201-300",
    "301-400",
    "401-500",
    "501-600",
    "601-700",
    "701-800",
    "801-900",
    "901-above",
];

/// The number of records whose price falls in a price range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRangeCount {
    /// The price range label, e.g. "101-200".
    pub range: String,
    /// The number of records in the range.
    pub count: u64,
}

/// The number of records in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// The number of records in the category.
    pub count: u64,
}

/// The index into [PRICE_RANGE_LABELS] of the range containing `price`.
///
/// Ranges include their upper bound: the first range is `[0, 100]`, the next
/// `(100, 200]` and so on, with everything above 900 in the last range. Whole
/// prices therefore land exactly on the labels, and a price such as 100.5 goes
/// to "101-200".
pub(super) fn price_range_index(price: f64) -> usize {
    if price.is_nan() || price <= PRICE_RANGE_WIDTH {
        return 0;
    }

    let index = (price / PRICE_RANGE_WIDTH).ceil() as usize - 1;
    index.min(PRICE_RANGE_LABELS.len() - 1)
}

/// Count `records` per price range. Every range is present, in order.
pub(crate) fn bucket_prices(records: &[TransactionRecord]) -> Vec<PriceRangeCount> {
    let mut counts = [0u64; PRICE_RANGE_LABELS.len()];

    for record in records {
        counts[price_range_index(record.price)] += 1;
    }

    PRICE_RANGE_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| PriceRangeCount {
            range: (*label).to_owned(),
            count,
        })
        .collect()
}

/// Count `records` per category. Only categories that occur are included.
pub(super) fn count_categories(records: &[TransactionRecord]) -> BTreeMap<String, u64> {
    let mut counts = BTreeMap::new();

    for record in records {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }

    counts
}

/// The price range histogram for `month` of any year, or for every record
/// when `month` is `None`.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn price_range_histogram(
    store: &dyn TransactionStore,
    month: Option<Month>,
) -> Result<Vec<PriceRangeCount>, Error> {
    let records = store.records_in_month(month)?;

    Ok(bucket_prices(&records))
}

/// The category histogram for `month` of any year, or for every record when
/// `month` is `None`, sorted by category name.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn category_histogram(
    store: &dyn TransactionStore,
    month: Option<Month>,
) -> Result<Vec<CategoryCount>, Error> {
    let records = store.records_in_month(month)?;

    Ok(tally_categories(&records))
}

/// The non-zero category counts of `records`, in category name order.
pub(crate) fn tally_categories(records: &[TransactionRecord]) -> Vec<CategoryCount> {
    count_categories(records)
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}
