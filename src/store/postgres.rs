//! Relational store adapter: connection pool and the batched catalog query.

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use super::CatalogStore;
use crate::domain::CatalogEntry;
use crate::error::{StoreError, StoreKind};

const MAX_CONNECTIONS: u32 = 5;

/// Single batched lookup: one `= ANY` round trip for the whole id set.
const CATALOG_SQL: &str =
    "SELECT product_id, title, price FROM products WHERE product_id = ANY($1)";

pub async fn connect(url: &str) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect(url)
        .await
        .map_err(|e| StoreError::unavailable(StoreKind::Postgres, e))
}

pub async fn ping(pool: &PgPool) -> Result<(), StoreError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(|e| StoreError::unavailable(StoreKind::Postgres, e))?;
    Ok(())
}

/// Catalog reader over the shared pool.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CatalogRow {
    product_id: Uuid,
    title: String,
    price: Decimal,
}

impl From<CatalogRow> for CatalogEntry {
    fn from(row: CatalogRow) -> Self {
        CatalogEntry {
            product_id: row.product_id,
            title: row.title,
            unit_price: row.price,
        }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn fetch_entries(&self, product_ids: &[Uuid]) -> Result<Vec<CatalogEntry>, StoreError> {
        let ids = product_ids.to_vec();
        let rows: Vec<CatalogRow> = sqlx::query_as(CATALOG_SQL)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StoreError::query(StoreKind::Postgres, e))?;

        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}
