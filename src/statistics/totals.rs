//! Sales totals for a month.

use serde::{Deserialize, Serialize};
use time::Month;

use crate::{
    Error,
    transaction::{TransactionRecord, TransactionStore},
};

/// Sales figures for the records in one month.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthStatistics {
    /// The sum of the prices of the sold records, rounded to cents.
    pub total_sale_amount: f64,
    /// The number of sold records.
    pub sold_count: u64,
    /// The number of records that were not sold.
    pub unsold_count: u64,
}

/// Compute the sales figures for `records`.
pub(crate) fn summarize_sales(records: &[TransactionRecord]) -> MonthStatistics {
    let mut statistics = MonthStatistics::default();

    for record in records {
        if record.sold {
            statistics.total_sale_amount += record.price;
            statistics.sold_count += 1;
        } else {
            statistics.unsold_count += 1;
        }
    }

    statistics.total_sale_amount = round_to_cents(statistics.total_sale_amount);
    statistics
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// The sales figures for `month` of any year, or for every record when
/// `month` is `None`.
///
/// A month without records has all figures set to zero.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn month_statistics(
    store: &dyn TransactionStore,
    month: Option<Month>,
) -> Result<MonthStatistics, Error> {
    let records = store.records_in_month(month)?;

    Ok(summarize_sales(&records))
}
