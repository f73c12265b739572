//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`store`] — In-memory [`CatalogStore`](crate::store::CatalogStore),
//!   [`CartStore`](crate::store::CartStore) and
//!   [`PurchaseGraphStore`](crate::store::PurchaseGraphStore) fakes.
//! - [`domain`] — Builders for carts, lines and catalog entries.

pub mod domain;
pub mod store;

pub use store::{RecordingCatalog, StaticCarts, StaticGraph};
