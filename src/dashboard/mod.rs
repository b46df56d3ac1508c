//! Dashboard module
//!
//! Provides a single page with the transactions, sales totals and charts for
//! a month.

mod charts;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
