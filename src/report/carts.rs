//! The cross-store cart valuation report.
//!
//! Document store read, then one batched relational lookup, then the pure
//! correlation and rendering steps. The two reads are strictly sequential —
//! the lookup's id set is derived from the cart batch, so there is nothing
//! to parallelize.

use crate::domain::{correlate, distinct_product_ids, ValuatedCart};
use crate::error::StoreError;
use crate::store::{lookup, CartStore, CatalogStore};

use super::format_money;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Fetch, valuate and render the active carts.
pub async fn run(
    carts: &dyn CartStore,
    catalog: &dyn CatalogStore,
) -> Result<String, StoreError> {
    let batch = carts.active_carts().await?;
    let ids = distinct_product_ids(&batch);
    let map = lookup::resolve(catalog, &ids).await?;
    let valuated = correlate(&batch, &map);
    Ok(render(&valuated))
}

/// Render valuated carts as text. Pure projection; the input is never
/// mutated and the output is deterministic (timestamps are fixed-format
/// UTC, money has a fixed two-decimal form).
pub fn render(carts: &[ValuatedCart]) -> String {
    if carts.is_empty() {
        return "No active carts.\n".into();
    }

    let mut out = String::new();
    out.push_str(&format!("Active carts: {}\n", carts.len()));

    for cart in carts {
        out.push_str(&format!("\nCart {} — user {}\n", cart.cart_id, cart.user_id));
        out.push_str(&format!(
            "Updated: {}\n",
            cart.updated_at.format(TIMESTAMP_FORMAT)
        ));

        if cart.lines.is_empty() {
            out.push_str("  (no items)\n");
        }
        for line in &cart.lines {
            match (&line.title, line.unit_price, line.subtotal) {
                (Some(title), Some(unit_price), Some(subtotal)) => {
                    out.push_str(&format!(
                        "  {} x {} @ {} = {}\n",
                        line.quantity,
                        title,
                        format_money(unit_price),
                        format_money(subtotal)
                    ));
                }
                _ => {
                    out.push_str(&format!(
                        "  {} x {} (not in catalog)\n",
                        line.quantity, line.product_id
                    ));
                }
            }
        }

        out.push_str(&format!("Total: {}\n", format_money(cart.total)));
    }

    out
}
