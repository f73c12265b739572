//! Cart snapshot types as read from the document store.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One line item in a cart. Quantity is positive; the same product may
/// appear on several lines of one cart and is never deduplicated here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// A snapshot of one user's in-progress cart.
///
/// `user_id` is opaque to this subsystem — there is no referential check
/// against the relational store. `lines` may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDocument {
    pub cart_id: String,
    pub user_id: String,
    pub updated_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
}
