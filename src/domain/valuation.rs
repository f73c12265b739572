//! Cart valuation: joining cart lines against the catalog in memory.
//!
//! The two stores have no native cross-store join, so the correlation
//! happens here, as a pure function of the cart batch and the catalog map.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::BTreeSet;
use uuid::Uuid;

use super::cart::CartDocument;
use super::catalog::CatalogMap;

/// A cart line after catalog lookup.
///
/// An unresolved line (product id absent from the catalog) keeps its id and
/// quantity but carries no title, price or subtotal. Unresolved is a modeled
/// outcome, not an error, and contributes nothing to the cart total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuatedLine {
    pub product_id: Uuid,
    pub quantity: u32,
    pub title: Option<String>,
    pub unit_price: Option<Decimal>,
    pub subtotal: Option<Decimal>,
}

impl ValuatedLine {
    pub fn is_resolved(&self) -> bool {
        self.subtotal.is_some()
    }
}

/// A cart with every line valuated and the total computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuatedCart {
    pub cart_id: String,
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<ValuatedLine>,
    pub total: Decimal,
}

/// Collect the distinct product ids referenced by a cart batch.
///
/// One set-construction pass over all lines; the `BTreeSet` gives the
/// batched lookup a deterministic parameter order.
pub fn distinct_product_ids(carts: &[CartDocument]) -> BTreeSet<Uuid> {
    carts
        .iter()
        .flat_map(|cart| cart.lines.iter())
        .map(|line| line.product_id)
        .collect()
}

/// Valuate a batch of carts against a catalog map.
///
/// Order-preserving over both carts and lines; never drops or adds a line.
/// A cart whose every line is unresolved totals zero but is distinguishable
/// from an empty cart by its line count.
pub fn correlate(carts: &[CartDocument], catalog: &CatalogMap) -> Vec<ValuatedCart> {
    carts
        .iter()
        .map(|cart| {
            let lines: Vec<ValuatedLine> = cart
                .lines
                .iter()
                .map(|line| match catalog.get(&line.product_id) {
                    Some(entry) => {
                        let subtotal = entry.unit_price * Decimal::from(line.quantity);
                        ValuatedLine {
                            product_id: line.product_id,
                            quantity: line.quantity,
                            title: Some(entry.title.clone()),
                            unit_price: Some(entry.unit_price),
                            subtotal: Some(subtotal),
                        }
                    }
                    None => ValuatedLine {
                        product_id: line.product_id,
                        quantity: line.quantity,
                        title: None,
                        unit_price: None,
                        subtotal: None,
                    },
                })
                .collect();

            let total: Decimal = lines.iter().filter_map(|line| line.subtotal).sum();

            ValuatedCart {
                cart_id: cart.cart_id.clone(),
                user_id: cart.user_id.clone(),
                updated_at: cart.updated_at,
                lines,
                total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::CartLine;
    use crate::domain::catalog::CatalogEntry;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    fn cart(id: &str, lines: Vec<CartLine>) -> CartDocument {
        CartDocument {
            cart_id: id.into(),
            user_id: format!("user-{id}"),
            updated_at: Utc.with_ymd_and_hms(2026, 8, 12, 14, 3, 11).unwrap(),
            lines,
        }
    }

    fn line(product: u128, quantity: u32) -> CartLine {
        CartLine {
            product_id: uid(product),
            quantity,
        }
    }

    fn catalog(entries: &[(u128, &str, Decimal)]) -> CatalogMap {
        entries
            .iter()
            .map(|(id, title, price)| {
                (
                    uid(*id),
                    CatalogEntry {
                        product_id: uid(*id),
                        title: (*title).into(),
                        unit_price: *price,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn totals_exclude_unresolved_lines() {
        let catalog = catalog(&[(1, "A", dec!(1000)), (2, "B", dec!(2500))]);
        let carts = vec![cart("c1", vec![line(1, 2), line(2, 1), line(3, 5)])];

        let valuated = correlate(&carts, &catalog);

        assert_eq!(valuated.len(), 1);
        let cart = &valuated[0];
        assert_eq!(cart.lines.len(), 3);
        assert_eq!(cart.lines[0].subtotal, Some(dec!(2000)));
        assert_eq!(cart.lines[1].subtotal, Some(dec!(2500)));
        assert!(!cart.lines[2].is_resolved());
        assert_eq!(cart.lines[2].subtotal, None);
        assert_eq!(cart.total, dec!(4500));
    }

    #[test]
    fn line_count_is_preserved_exactly() {
        let catalog = catalog(&[(1, "A", dec!(10))]);
        let carts = vec![
            cart("c1", vec![line(1, 1), line(9, 1), line(1, 3)]),
            cart("c2", vec![]),
            cart("c3", vec![line(7, 2)]),
        ];

        let valuated = correlate(&carts, &catalog);

        let counts: Vec<usize> = valuated.iter().map(|c| c.lines.len()).collect();
        assert_eq!(counts, vec![3, 0, 1]);
    }

    #[test]
    fn duplicate_product_lines_are_valuated_independently() {
        let catalog = catalog(&[(1, "A", dec!(9.99))]);
        let carts = vec![cart("c1", vec![line(1, 2), line(1, 3)])];

        let valuated = correlate(&carts, &catalog);

        assert_eq!(valuated[0].lines[0].subtotal, Some(dec!(19.98)));
        assert_eq!(valuated[0].lines[1].subtotal, Some(dec!(29.97)));
        assert_eq!(valuated[0].total, dec!(49.95));
    }

    #[test]
    fn empty_cart_totals_zero() {
        let valuated = correlate(&[cart("c1", vec![])], &CatalogMap::new());

        assert_eq!(valuated[0].total, Decimal::ZERO);
        assert!(valuated[0].lines.is_empty());
    }

    #[test]
    fn all_unresolved_cart_is_distinguishable_from_empty() {
        let carts = vec![cart("c1", vec![line(1, 2), line(2, 1)]), cart("c2", vec![])];

        let valuated = correlate(&carts, &CatalogMap::new());

        assert_eq!(valuated[0].total, Decimal::ZERO);
        assert_eq!(valuated[0].lines.len(), 2);
        assert!(valuated[0].lines.iter().all(|l| !l.is_resolved()));
        assert_eq!(valuated[1].total, Decimal::ZERO);
        assert!(valuated[1].lines.is_empty());
    }

    #[test]
    fn correlate_is_pure_and_idempotent() {
        let catalog = catalog(&[(1, "A", dec!(12.50))]);
        let carts = vec![cart("c1", vec![line(1, 4), line(2, 1)])];

        let first = correlate(&carts, &catalog);
        let second = correlate(&carts, &catalog);

        assert_eq!(first, second);
    }

    #[test]
    fn subtotals_use_exact_decimal_arithmetic() {
        // 0.1 * 3 drifts under binary floats; it must not here.
        let catalog = catalog(&[(1, "A", dec!(0.10))]);
        let carts = vec![cart("c1", vec![line(1, 3)])];

        let valuated = correlate(&carts, &catalog);

        assert_eq!(valuated[0].total, dec!(0.30));
    }

    #[test]
    fn distinct_ids_collapse_duplicates_across_carts_and_lines() {
        let carts = vec![
            cart("c1", vec![line(1, 1), line(2, 1), line(1, 5)]),
            cart("c2", vec![line(2, 2), line(3, 1)]),
        ];

        let ids = distinct_product_ids(&carts);

        assert_eq!(ids, BTreeSet::from([uid(1), uid(2), uid(3)]));
    }

    #[test]
    fn distinct_ids_of_empty_batch_is_empty() {
        assert!(distinct_product_ids(&[]).is_empty());
        assert!(distinct_product_ids(&[cart("c1", vec![])]).is_empty());
    }
}
