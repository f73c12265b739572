//! In-memory store fakes for exercising the report pipeline without any
//! live store.

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::{CartDocument, CatalogEntry, ConnectionCount};
use crate::error::{StoreError, StoreKind};
use crate::store::{CartStore, CatalogStore, PurchaseGraphStore};

/// Catalog fake that records every fetch so tests can assert the batching
/// contract: how many queries were issued and how many ids each carried.
#[derive(Default)]
pub struct RecordingCatalog {
    entries: HashMap<Uuid, CatalogEntry>,
    fail: bool,
    calls: AtomicUsize,
    batches: Mutex<Vec<usize>>,
}

impl RecordingCatalog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_entry(mut self, product_id: Uuid, title: &str, unit_price: Decimal) -> Self {
        self.entries.insert(
            product_id,
            CatalogEntry {
                product_id,
                title: title.into(),
                unit_price,
            },
        );
        self
    }

    /// Number of `fetch_entries` calls issued so far.
    pub fn fetch_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Id-set size of each issued call, in call order.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batches.lock().expect("batches lock").clone()
    }
}

#[async_trait]
impl CatalogStore for RecordingCatalog {
    async fn fetch_entries(&self, product_ids: &[Uuid]) -> Result<Vec<CatalogEntry>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.batches
            .lock()
            .expect("batches lock")
            .push(product_ids.len());

        if self.fail {
            return Err(StoreError::query(
                StoreKind::Postgres,
                "injected catalog failure",
            ));
        }

        Ok(product_ids
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect())
    }
}

/// Cart store fake returning a fixed batch (or a fixed failure).
#[derive(Default)]
pub struct StaticCarts {
    carts: Vec<CartDocument>,
    fail: bool,
}

impl StaticCarts {
    pub fn new(carts: Vec<CartDocument>) -> Self {
        Self { carts, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            carts: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CartStore for StaticCarts {
    async fn active_carts(&self) -> Result<Vec<CartDocument>, StoreError> {
        if self.fail {
            return Err(StoreError::query(StoreKind::Mongo, "injected cart failure"));
        }
        Ok(self.carts.clone())
    }
}

/// Graph fake over fixed counts. Ranking uses a stable sort so tie order is
/// deterministic for tests: equal counts keep their insertion order.
pub struct StaticGraph {
    counts: Vec<ConnectionCount>,
}

impl StaticGraph {
    pub fn new(counts: Vec<(&str, u64)>) -> Self {
        Self {
            counts: counts
                .into_iter()
                .map(|(entity, count)| ConnectionCount {
                    entity: entity.into(),
                    count,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl PurchaseGraphStore for StaticGraph {
    async fn top_by_distinct_connections(
        &self,
        _relationship: &str,
        _target_label: &str,
        limit: i64,
    ) -> Result<Vec<ConnectionCount>, StoreError> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(ranked)
    }
}
