//! Marketlens - cross-store commerce reporting.
//!
//! A read-only CLI that answers fixed analytical questions over commerce
//! data held in three stores: PostgreSQL (users, products, categories,
//! orders), MongoDB (cart snapshots) and Neo4j (purchase relationships).
//!
//! # Architecture
//!
//! The one genuinely cross-store behavior is cart valuation: cart line
//! items from the document store are reconciled against the authoritative
//! Postgres catalog with a single batched lookup, and per-line subtotals
//! and cart totals are computed with exact decimal arithmetic. A product id
//! with no catalog row is a modeled outcome, rendered distinctly — never an
//! error.
//!
//! # Modules
//!
//! - [`config`] - TOML settings plus environment-sourced store credentials
//! - [`domain`] - Store-agnostic types and the pure correlation engine
//! - [`error`] - Error taxonomy for the crate
//! - [`store`] - Store traits, the three adapters and the batched lookup
//! - [`report`] - Report pipelines and rendering
//! - [`cli`] - clap definitions, the interactive menu, output helpers
//! - [`app`] - Application orchestration
//!
//! # Example
//!
//! ```
//! use marketlens::domain::{correlate, distinct_product_ids, CatalogMap};
//!
//! let carts = Vec::new();
//! let ids = distinct_product_ids(&carts);
//! assert!(ids.is_empty());
//! let valuated = correlate(&carts, &CatalogMap::new());
//! assert!(valuated.is_empty());
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod report;
pub mod store;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
