//! Builders for domain values with fixed, test-friendly defaults.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{CartDocument, CartLine, CatalogEntry, CatalogMap};

/// Deterministic uuid from a small integer.
pub fn uid(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

/// Fixed timestamp used by all built carts.
pub fn fixed_updated_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 12, 14, 3, 11).unwrap()
}

pub fn line(product: u128, quantity: u32) -> CartLine {
    CartLine {
        product_id: uid(product),
        quantity,
    }
}

pub fn cart(id: &str, user: &str, lines: Vec<CartLine>) -> CartDocument {
    CartDocument {
        cart_id: id.into(),
        user_id: user.into(),
        updated_at: fixed_updated_at(),
        lines,
    }
}

pub fn catalog(entries: &[(u128, &str, Decimal)]) -> CatalogMap {
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
