//! Report pipelines and rendering.
//!
//! Every report here returns a `String`; the CLI layer only prints. The
//! cart report is the one cross-store pipeline, the connections report is
//! the graph ranking, and `queries` holds the fixed single-store reports.

pub mod carts;
pub mod connections;
pub mod queries;

use rust_decimal::Decimal;

/// Fixed money rendering: dollar sign, two decimal places, no locale.
pub(crate) fn format_money(amount: Decimal) -> String {
    format!("${amount:.2}")
}
