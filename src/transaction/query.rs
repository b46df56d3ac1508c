//! Searching and paging through transaction records.

use time::Month;

use crate::Error;

use super::{core::TransactionRecord, store::TransactionStore};

/// Selects the records to list.
///
/// A record matches when it was sold in `month` (any month if `None`) and the
/// search text is empty or found, ignoring case, in the title, the description
/// or the price written as a decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionFilter {
    month: Option<Month>,
    /// Trimmed and lowercased.
    search: String,
}

impl TransactionFilter {
    /// Create a filter for `month` and the free text `search`.
    pub fn new(month: Option<Month>, search: &str) -> Self {
        Self {
            month,
            search: search.trim().to_lowercase(),
        }
    }

    /// The month to filter on, if any.
    pub fn month(&self) -> Option<Month> {
        self.month
    }

    /// The normalized search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Whether `record` passes the filter.
    pub fn matches(&self, record: &TransactionRecord) -> bool {
        if self.month.is_some_and(|month| record.month() != month) {
            return false;
        }

        if self.search.is_empty() {
            return true;
        }

        record.title.to_lowercase().contains(&self.search)
            || record.description.to_lowercase().contains(&self.search)
            || record.price.to_string().contains(&self.search)
    }
}

/// A one-indexed page of a given size.
///
/// Use [crate::params::parse_page_request] to build one from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The page number, starting from 1.
    pub page: u64,
    /// The maximum number of records on a page. At least 1.
    pub page_size: u64,
}

impl PageRequest {
    /// The number of records that come before this page.
    fn offset(self) -> usize {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        usize::try_from(offset).unwrap_or(usize::MAX)
    }

    fn limit(self) -> usize {
        usize::try_from(self.page_size).unwrap_or(usize::MAX)
    }
}

/// One page of the records that matched a [TransactionFilter].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The records on the requested page, in ascending ID order.
    pub items: Vec<TransactionRecord>,
    /// The number of matching records across all pages.
    pub total_matched: usize,
    /// The page that was requested.
    pub page: PageRequest,
}

impl TransactionPage {
    /// The number of records on this page.
    pub fn matched_on_page(&self) -> usize {
        self.items.len()
    }

    /// The number of pages needed to show every match.
    pub fn page_count(&self) -> u64 {
        (self.total_matched as u64).div_ceil(self.page.page_size.max(1))
    }
}

/// List the records in `store` that match `filter`, one page at a time.
///
/// A page past the last match is empty rather than an error.
///
/// # Errors
/// Returns an error if the store could not be read.
pub fn list_transactions(
    store: &dyn TransactionStore,
    filter: &TransactionFilter,
    page: PageRequest,
) -> Result<TransactionPage, Error> {
    let records = store.records_in_month(filter.month())?;

    Ok(page_records(&records, filter, page))
}

/// Pick the page of `records` that match `filter`.
pub(crate) fn page_records(
    records: &[TransactionRecord],
    filter: &TransactionFilter,
    page: PageRequest,
) -> TransactionPage {
    let matches: Vec<&TransactionRecord> = records
        .iter()
        .filter(|record| filter.matches(record))
        .collect();

    let total_matched = matches.len();
    let items = matches
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .cloned()
        .collect();

    TransactionPage {
        items,
        total_matched,
        page,
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        test_utils::{generated_records, sample_records, store_with},
        transaction::TransactionRecord,
    };

    use super::{PageRequest, TransactionFilter, list_transactions};

    fn page(page: u64, page_size: u64) -> PageRequest {
        PageRequest { page, page_size }
    }

    fn ids(records: &[TransactionRecord]) -> Vec<i64> {
        records.iter().map(|record| record.id).collect()
    }

    #[test]
    fn empty_search_matches_every_record_in_month() {
        let store = store_with(sample_records());
        let filter = TransactionFilter::new(Some(Month::March), "");

        let got = list_transactions(&store, &filter, page(1, 10)).unwrap();

        assert!(!got.items.is_empty());
        assert!(got.items.iter().all(|record| record.month() == Month::March));
        assert_eq!(got.total_matched, got.matched_on_page());
    }

    #[test]
    fn search_matches_title_description_and_price() {
        let record = TransactionRecord::build(1, "Fjallraven Backpack", 109.95, date!(2021 - 11 - 27))
            .description("Fits 15 inch laptops")
            .finish();

        assert!(TransactionFilter::new(None, "backpack").matches(&record));
        assert!(TransactionFilter::new(None, "LAPTOPS").matches(&record));
        assert!(TransactionFilter::new(None, "109.9").matches(&record));
        assert!(TransactionFilter::new(None, "  fjall  ").matches(&record));
        assert!(!TransactionFilter::new(None, "monitor").matches(&record));
        assert!(!TransactionFilter::new(Some(Month::March), "backpack").matches(&record));
    }

    #[test]
    fn whole_prices_are_searched_without_decimals() {
        let record = TransactionRecord::build(1, "Drive", 64.0, date!(2022 - 03 - 12)).finish();

        assert!(TransactionFilter::new(None, "64").matches(&record));
        assert!(!TransactionFilter::new(None, "64.0").matches(&record));
    }

    #[test]
    fn search_is_case_insensitive() {
        let store = store_with(sample_records());

        let upper =
            list_transactions(&store, &TransactionFilter::new(None, "SHIRT"), page(1, 100)).unwrap();
        let lower =
            list_transactions(&store, &TransactionFilter::new(None, "shirt"), page(1, 100)).unwrap();

        assert!(!upper.items.is_empty());
        assert_eq!(upper, lower);
    }

    #[test]
    fn consecutive_pages_are_disjoint_and_cover_a_larger_page() {
        let store = store_with(generated_records(45));
        let filter = TransactionFilter::default();

        let first = list_transactions(&store, &filter, page(1, 10)).unwrap();
        let second = list_transactions(&store, &filter, page(2, 10)).unwrap();
        let both = list_transactions(&store, &filter, page(1, 20)).unwrap();

        let mut combined = ids(&first.items);
        combined.extend(ids(&second.items));

        assert_eq!(first.matched_on_page(), 10);
        assert_eq!(second.matched_on_page(), 10);
        assert!(ids(&first.items).iter().all(|id| !ids(&second.items).contains(id)));
        assert_eq!(combined, ids(&both.items));
    }

    #[test]
    fn last_page_is_partial() {
        let store = store_with(generated_records(25));

        let got = list_transactions(&store, &TransactionFilter::default(), page(3, 10)).unwrap();

        assert_eq!(got.matched_on_page(), 5);
        assert_eq!(got.total_matched, 25);
        assert_eq!(got.page_count(), 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let store = store_with(generated_records(25));

        let got = list_transactions(&store, &TransactionFilter::default(), page(4, 10)).unwrap();
        let far = list_transactions(&store, &TransactionFilter::default(), page(u64::MAX, 10))
            .unwrap();

        assert!(got.items.is_empty());
        assert_eq!(got.total_matched, 25);
        assert!(far.items.is_empty());
    }

    #[test]
    fn no_matches_has_zero_pages() {
        let store = store_with(sample_records());

        let got = list_transactions(
            &store,
            &TransactionFilter::new(None, "no such product"),
            page(1, 10),
        )
        .unwrap();

        assert!(got.items.is_empty());
        assert_eq!(got.page_count(), 0);
    }
}
