//! Defines the route handler for searching transactions.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    AppState, Error,
    params::{ListParams, extract},
};

use super::{core::TransactionRecord, query::list_transactions};

/// Return one page of the transactions matching the `month` and `search`
/// query parameters as a JSON array.
pub async fn get_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<TransactionRecord>>, Error> {
    let (filter, page) = extract(query)?.validate(&state.pagination_config)?;

    let page = state
        .with_store(move |store| list_transactions(store, &filter, page))
        .await
        .inspect_err(|error| tracing::error!("could not list transactions: {error}"))?;

    Ok(Json(page.items))
}
