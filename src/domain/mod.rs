//! Store-agnostic domain types and the cart valuation engine.
//!
//! Nothing in this module performs I/O. The adapters in [`crate::store`]
//! produce these types; [`crate::report`] consumes them.

pub mod cart;
pub mod catalog;
pub mod valuation;

pub use cart::{CartDocument, CartLine};
pub use catalog::{CatalogEntry, CatalogMap};
pub use valuation::{correlate, distinct_product_ids, ValuatedCart, ValuatedLine};

/// One row of the purchase-graph ranking: an entity and how many distinct
/// neighbors it is connected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionCount {
    pub entity: String,
    pub count: u64,
}
