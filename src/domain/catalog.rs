//! Authoritative product catalog data from the relational store.

use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

/// Point-in-time snapshot of one product's catalog row.
///
/// The relational store is always the source of truth for pricing; any price
/// carried inside a stored cart is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub product_id: Uuid,
    pub title: String,
    pub unit_price: Decimal,
}

/// Product id → catalog entry, built fresh for one report invocation and
/// discarded after rendering.
pub type CatalogMap = HashMap<Uuid, CatalogEntry>;
