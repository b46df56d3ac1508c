//! Route handlers for the statistics and chart data of a month.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    AppState, Error,
    params::{MonthParams, extract, parse_month},
};

use super::{
    histogram::{CategoryCount, PriceRangeCount, category_histogram, price_range_histogram},
    totals::{MonthStatistics, month_statistics},
};

/// Return the sales totals for the `month` query parameter.
pub async fn get_statistics(
    State(state): State<AppState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<MonthStatistics>, Error> {
    let month = parse_month(extract(query)?.month.as_deref())?;

    state
        .with_store(move |store| month_statistics(store, month))
        .await
        .map(Json)
}

/// Return the price range histogram for the `month` query parameter.
pub async fn get_bar_chart(
    State(state): State<AppState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<PriceRangeCount>>, Error> {
    let month = parse_month(extract(query)?.month.as_deref())?;

    state
        .with_store(move |store| price_range_histogram(store, month))
        .await
        .map(Json)
}

/// Return the category histogram for the `month` query parameter.
pub async fn get_pie_chart(
    State(state): State<AppState>,
    query: Result<Query<MonthParams>, QueryRejection>,
) -> Result<Json<Vec<CategoryCount>>, Error> {
    let month = parse_month(extract(query)?.month.as_deref())?;

    state
        .with_store(move |store| category_histogram(store, month))
        .await
        .map(Json)
}
