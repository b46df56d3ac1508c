//! Parsing and validation of the query parameters shared by the endpoints.

use axum::extract::{Query, rejection::QueryRejection};
use serde::Deserialize;
use time::Month;

use crate::{
    Error,
    pagination::PaginationConfig,
    transaction::{PageRequest, TransactionFilter},
};

/// Query parameters for endpoints that only take a month.
#[derive(Debug, Default, Deserialize)]
pub struct MonthParams {
    /// The month number, 1 to 12. Missing or empty means every month.
    pub month: Option<String>,
}

/// Query parameters for endpoints that list transactions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// The month number, 1 to 12. Missing or empty means every month.
    pub month: Option<String>,
    /// Free text to search for.
    pub search: Option<String>,
    /// The one-indexed page number.
    pub page: Option<String>,
    /// The number of transactions per page.
    #[serde(alias = "per_page")]
    pub per_page: Option<String>,
}

impl ListParams {
    /// Validate the parameters, applying the defaults from `config`.
    ///
    /// # Errors
    /// Returns a validation error if the month, page or page size is invalid.
    pub fn validate(
        &self,
        config: &PaginationConfig,
    ) -> Result<(TransactionFilter, PageRequest), Error> {
        let month = parse_month(self.month.as_deref())?;
        let page = parse_page_request(self.page.as_deref(), self.per_page.as_deref(), config)?;
        let filter = TransactionFilter::new(month, self.search.as_deref().unwrap_or_default());

        Ok((filter, page))
    }
}

/// Unwrap the query extractor, turning a rejection into a validation error so
/// that the client still gets a JSON error body.
pub fn extract<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, Error> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| Error::InvalidQuery(rejection.body_text()))
}

/// Parse a month number.
///
/// `None` and blank strings mean "every month".
///
/// # Errors
/// Returns an [Error::InvalidMonth] if `raw` is not a whole number from 1 to 12.
pub fn parse_month(raw: Option<&str>) -> Result<Option<Month>, Error> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(raw) => raw,
    };

    raw.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .map(Some)
        .ok_or_else(|| Error::InvalidMonth(raw.to_owned()))
}

/// Parse a one-indexed page number and page size, falling back to the
/// defaults in `config` for missing or blank values.
///
/// # Errors
/// Returns an [Error::InvalidPage] if the page is not a whole number of at
/// least 1, or an [Error::InvalidPageSize] if the page size is not a whole
/// number from 1 to [PaginationConfig::max_page_size].
pub fn parse_page_request(
    page: Option<&str>,
    page_size: Option<&str>,
    config: &PaginationConfig,
) -> Result<PageRequest, Error> {
    let page = match page.map(str::trim) {
        None | Some("") => config.default_page,
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|&page| page >= 1)
            .ok_or_else(|| Error::InvalidPage(raw.to_owned()))?,
    };

    let page_size = match page_size.map(str::trim) {
        None | Some("") => config.default_page_size,
        Some(raw) => raw
            .parse::<u64>()
            .ok()
            .filter(|&size| (1..=config.max_page_size).contains(&size))
            .ok_or_else(|| Error::InvalidPageSize(raw.to_owned(), config.max_page_size))?,
    };

    Ok(PageRequest { page, page_size })
}
