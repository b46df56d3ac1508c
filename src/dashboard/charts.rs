//! Chart generation and rendering for the dashboard.
//!
//! Both charts are generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Orient, Tooltip, Trigger},
    series::{Bar, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    html::HeadElement,
    statistics::{CategoryCount, PriceRangeCount},
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for dashboard charts.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Each chart is initialized once the page has loaded and resizes with the
/// window.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn price_range_chart(month_label: &str, price_ranges: &[PriceRangeCount]) -> Chart {
    let labels: Vec<String> = price_ranges
        .iter()
        .map(|bucket| bucket.range.clone())
        .collect();
    let values: Vec<f64> = price_ranges
        .iter()
        .map(|bucket| bucket.count as f64)
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Items per Price Range")
                .subtext(month_label),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Items").data(values))
}

pub(super) fn category_chart(month_label: &str, categories: &[CategoryCount]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|category| (category.count as f64, category.category.as_str()))
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Items per Category")
                .subtext(month_label),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().orient(Orient::Vertical).left("left").top("15%"))
        .series(Pie::new().name("Items").radius("60%").data(data))
}
