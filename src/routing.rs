//! Application router configuration.

use axum::{Router, routing::get};

use crate::{
    AppState, Error,
    combined::get_combined,
    dashboard::get_dashboard_page,
    endpoints,
    seed::initialize_endpoint,
    statistics::{get_bar_chart, get_pie_chart, get_statistics},
    transaction::get_transactions,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::DASHBOARD, get(get_dashboard_page))
        .route(
            endpoints::INITIALIZE,
            get(initialize_endpoint).post(initialize_endpoint),
        )
        .route(endpoints::TRANSACTIONS, get(get_transactions))
        .route(endpoints::STATISTICS, get(get_statistics))
        .route(endpoints::BAR_CHART, get(get_bar_chart))
        .route(endpoints::PIE_CHART, get(get_pie_chart))
        .route(endpoints::COMBINED, get(get_combined))
        .fallback(get_404_not_found)
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .with_state(state)
}

async fn get_404_not_found() -> Error {
    Error::NotFound
}

async fn get_405_method_not_allowed() -> Error {
    Error::MethodNotAllowed
}
