//! Monthly sales statistics.
//!
//! Computes the sales totals, the price range histogram and the category
//! histogram for the records sold in a given month of any year.

mod endpoints;
mod histogram;
mod totals;

pub use endpoints::{get_bar_chart, get_pie_chart, get_statistics};
pub use histogram::{CategoryCount, PriceRangeCount, category_histogram, price_range_histogram};
pub use totals::{MonthStatistics, month_statistics};
pub(crate) use histogram::{bucket_prices, tally_categories};
pub(crate) use totals::summarize_sales;
