//! Dashboard HTTP handler and view rendering.

use axum::extract::{Query, State, rejection::QueryRejection};
use maud::{Markup, html};
use serde::Deserialize;
use time::Month;

use crate::{
    AppState, Error,
    combined::{CombinedView, query_month},
    dashboard::{
        charts::{DashboardChart, category_chart, charts_script, charts_view, price_range_chart},
        tables::{statistics_card, transactions_table},
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, LINK_STYLE, PAGE_CONTAINER_STYLE, base,
    },
    pagination::{PaginationIndicator, create_pagination_indicators},
    params::{extract, parse_month, parse_page_request},
    transaction::{TransactionFilter, TransactionPage},
};

/// The month shown when the request does not name one.
const DEFAULT_MONTH: Month = Month::March;

/// The query parameters accepted by the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// The month number. Missing means March, empty means every month.
    pub month: Option<String>,
    /// Free text to search the transactions for.
    pub search: Option<String>,
    /// The one-indexed page of transactions.
    pub page: Option<String>,
}

/// The month and search text the page was rendered for, used to build links
/// that keep them.
struct Selection {
    month: Option<Month>,
    search: String,
}

impl Selection {
    fn month_label(&self) -> String {
        match self.month {
            Some(month) => month.to_string(),
            None => "All months".to_owned(),
        }
    }

    fn page_url(&self, page: u64) -> String {
        let month = self
            .month
            .map(|month| u8::from(month).to_string())
            .unwrap_or_default();
        let page = page.to_string();

        let query = serde_urlencoded::to_string([
            ("month", month.as_str()),
            ("search", self.search.as_str()),
            ("page", page.as_str()),
        ])
        .unwrap_or_default();

        format!("{}?{query}", endpoints::DASHBOARD)
    }
}

/// Display the dashboard for the `month`, `search` and `page` query parameters.
pub async fn get_dashboard_page(
    State(state): State<AppState>,
    query: Result<Query<DashboardParams>, QueryRejection>,
) -> Result<Markup, Error> {
    let params = extract(query)?;

    let month = match params.month.as_deref() {
        None => Some(DEFAULT_MONTH),
        raw => parse_month(raw)?,
    };
    let page = parse_page_request(params.page.as_deref(), None, &state.pagination_config)?;
    let search = params.search.unwrap_or_default();

    let (transactions, view) = query_month(&state, TransactionFilter::new(month, &search), page)
        .await
        .inspect_err(|error| tracing::error!("could not build dashboard: {error}"))?;

    let selection = Selection { month, search };

    Ok(dashboard_view(
        &selection,
        &transactions,
        &view,
        state.pagination_config.max_pages,
    ))
}

fn build_dashboard_charts(month_label: &str, view: &CombinedView) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "price-range-chart",
            options: price_range_chart(month_label, &view.price_range_histogram).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(month_label, &view.category_histogram).to_string(),
        },
    ]
}

fn dashboard_view(
    selection: &Selection,
    transactions: &TransactionPage,
    view: &CombinedView,
    max_pages: u64,
) -> Markup {
    let month_label = selection.month_label();
    let charts = build_dashboard_charts(&month_label, view);
    let indicators =
        create_pagination_indicators(transactions.page.page, transactions.page_count(), max_pages);

    let content = html!(
        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-3xl font-bold mb-6" { "Transaction Dashboard" }

            (filter_form(selection))

            (transactions_table(&view.transactions))

            p class="my-2 text-sm text-gray-600 dark:text-gray-400"
            {
                (transactions.total_matched) " matching transactions"
            }

            (pagination_view(selection, &indicators))

            div class="my-6 w-full flex justify-center"
            {
                (statistics_card(&month_label, &view.statistics))
            }

            (charts_view(&charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

fn filter_form(selection: &Selection) -> Markup {
    let selected_month = selection.month.map(u8::from);

    html!(
        form
            method="get"
            action=(endpoints::DASHBOARD)
            class="flex flex-wrap items-end gap-4 mb-4 w-full"
        {
            div class="grow"
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search transaction" }
                input
                    type="search"
                    name="search"
                    id="search"
                    value=(selection.search)
                    placeholder="Title, description or price"
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }
                select name="month" id="month" class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected_month.is_none()] { "All months" }

                    @for number in 1..=12u8 {
                        @if let Ok(month) = Month::try_from(number) {
                            option
                                value=(number)
                                selected[selected_month == Some(number)]
                            {
                                (month)
                            }
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }
        }
    )
}

fn pagination_view(selection: &Selection, indicators: &[PaginationIndicator]) -> Markup {
    html!(
        nav class="pagination flex justify-center" aria-label="Transaction pages"
        {
            ul class="pagination flex items-center gap-2"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::CurrPage(page) => {
                                p aria-current="page" class="font-bold" { (page) }
                            }
                            PaginationIndicator::Page(page) => {
                                a href=(selection.page_url(*page)) class=(LINK_STYLE) { (page) }
                            }
                            PaginationIndicator::Ellipsis => {
                                "..."
                            }
                            PaginationIndicator::BackButton(page) => {
                                a href=(selection.page_url(*page)) class=(LINK_STYLE) rel="prev" { "Previous" }
                            }
                            PaginationIndicator::NextButton(page) => {
                                a href=(selection.page_url(*page)) class=(LINK_STYLE) rel="next" { "Next" }
                            }
                        }
                    }
                }
            }
        }
    )
}
