//! Table views for dashboard data display.

use maud::{Markup, html};

use crate::{
    html::{
        CATEGORY_BADGE_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        format_currency,
    },
    statistics::MonthStatistics,
    transaction::TransactionRecord,
};

const SOLD_STYLE: &str = "text-green-600 dark:text-green-400";
const UNSOLD_STYLE: &str = "text-red-600 dark:text-red-400";

/// Renders a table with one row per transaction.
pub(super) fn transactions_table(transactions: &[TransactionRecord]) -> Markup {
    html! {
        div class="overflow-x-auto rounded-lg shadow w-full"
        {
            table id="transactions" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Title" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Sold" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date of Sale" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
                        {
                            td class=(TABLE_CELL_STYLE) { (transaction.id) }
                            td class=(TABLE_CELL_STYLE) { (transaction.title) }
                            td class={(TABLE_CELL_STYLE) " max-w-md truncate"} title=(transaction.description)
                            {
                                (transaction.description)
                            }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"}
                            {
                                (format_currency(transaction.price))
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
                            }
                            @if transaction.sold {
                                td class={(TABLE_CELL_STYLE) " " (SOLD_STYLE)} { "Yes" }
                            } @else {
                                td class={(TABLE_CELL_STYLE) " " (UNSOLD_STYLE)} { "No" }
                            }
                            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"}
                            {
                                (transaction.date_of_sale)
                            }
                            td class=(TABLE_CELL_STYLE)
                            {
                                @if !transaction.image.is_empty() {
                                    img
                                        src=(transaction.image)
                                        alt=(transaction.title)
                                        class="w-10 h-10 object-contain"
                                        loading="lazy";
                                }
                            }
                        }
                    }

                    @if transactions.is_empty() {
                        tr class=(TABLE_ROW_STYLE)
                        {
                            td colspan="8" class={(TABLE_CELL_STYLE) " text-center"}
                            {
                                "No transactions found."
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Renders the sales totals for `month_label`.
pub(super) fn statistics_card(month_label: &str, statistics: &MonthStatistics) -> Markup {
    html! {
        section id="statistics" class="w-full max-w-sm p-6 rounded-lg shadow bg-white dark:bg-gray-800"
        {
            h3 class="text-xl font-semibold mb-4" { "Statistics - " (month_label) }

            dl class="grid grid-cols-2 gap-2"
            {
                dt { "Total sale" }
                dd class="text-right font-bold" data-statistic="total-sale-amount"
                {
                    (format_currency(statistics.total_sale_amount))
                }

                dt { "Total sold items" }
                dd class="text-right" data-statistic="sold-count" { (statistics.sold_count) }

                dt { "Total not sold items" }
                dd class="text-right" data-statistic="unsold-count" { (statistics.unsold_count) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{statistics::MonthStatistics, transaction::TransactionRecord};

    use super::{statistics_card, transactions_table};

    #[test]
    fn renders_a_row_per_transaction() {
        let transactions = vec![
            TransactionRecord::build(1, "Shirt", 44.6, date!(2022 - 03 - 01))
                .category("men's clothing")
                .sold(true)
                .finish(),
            TransactionRecord::build(2, "Ring", 9.99, date!(2022 - 03 - 02))
                .category("jewelery")
                .image("https://example.com/ring.jpg")
                .finish(),
        ];

        let html = Html::parse_fragment(&transactions_table(&transactions).into_string());

        let rows: Vec<_> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].attr("data-transaction-id"), Some("1"));
        let first_row_text = rows[0].text().collect::<String>();
        assert!(first_row_text.contains("$44.60"), "got {first_row_text}");
        assert!(first_row_text.contains("2022-03-01"));
        assert!(first_row_text.contains("Yes"));
        assert_eq!(
            html.select(&Selector::parse("img").unwrap()).count(),
            1,
            "only records with an image should render one"
        );
    }

    #[test]
    fn shows_message_when_empty() {
        let html = Html::parse_fragment(&transactions_table(&[]).into_string());

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions found."));
    }

    #[test]
    fn statistics_card_shows_totals() {
        let statistics = MonthStatistics {
            total_sale_amount: 50.0,
            sold_count: 1,
            unsold_count: 1,
        };

        let html = Html::parse_fragment(&statistics_card("March", &statistics).into_string());

        let total = html
            .select(&Selector::parse("[data-statistic='total-sale-amount']").unwrap())
            .next()
            .expect("missing total sale amount");
        assert_eq!(total.text().collect::<String>().trim(), "$50.00");
    }
}
