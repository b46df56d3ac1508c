//! The route handler that (re)loads the seed dataset.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, Error};

/// The response to a successful seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedSummary {
    /// A human readable confirmation.
    pub message: String,
    /// The number of records now in the store.
    pub inserted: usize,
}

/// Replace the stored transactions with the seed dataset.
///
/// Accepts both GET and POST so the endpoint can be triggered from a browser.
pub async fn initialize_endpoint(
    State(state): State<AppState>,
) -> Result<Json<SeedSummary>, Error> {
    let inserted = state.seed().await?;

    Ok(Json(SeedSummary {
        message: format!("Initialized the database with {inserted} transactions"),
        inserted,
    }))
}
