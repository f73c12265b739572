//! Store adapters and the query contracts the reports depend on.
//!
//! Each backing store sits behind a narrow async trait so the report
//! pipeline can be exercised against in-memory fakes. The concrete adapters
//! own all wire-format concerns; nothing outside this module sees a BSON
//! document, a Bolt record or a Postgres row.

pub mod lookup;
pub mod mongo;
pub mod neo4j;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{CartDocument, CatalogEntry, ConnectionCount};
use crate::error::StoreError;

/// Batched read access to the authoritative product catalog.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch catalog entries for the given product ids in one query.
    ///
    /// Callers pass a deduplicated id set; implementations must issue a
    /// single store round trip regardless of how many ids are requested.
    async fn fetch_entries(&self, product_ids: &[Uuid]) -> Result<Vec<CatalogEntry>, StoreError>;
}

/// Read access to cart snapshots.
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn active_carts(&self) -> Result<Vec<CartDocument>, StoreError>;
}

/// Read access to the purchase relationship graph.
#[async_trait]
pub trait PurchaseGraphStore: Send + Sync {
    /// Rank `target_label` entities by the number of distinct neighbors
    /// reachable over `relationship`, strictly descending, truncated to
    /// `limit`. Tie order between equal counts is whatever the store
    /// returns, stable within one call.
    async fn top_by_distinct_connections(
        &self,
        relationship: &str,
        target_label: &str,
        limit: i64,
    ) -> Result<Vec<ConnectionCount>, StoreError>;
}

/// Process-wide store handles, connected once at startup and borrowed by
/// every report. Shutdown is explicit so the interactive loop can release
/// connections in order on exit.
pub struct Stores {
    pub pg: sqlx::PgPool,
    pub catalog: postgres::PgCatalog,
    pub carts: mongo::MongoCarts,
    pub graph: neo4j::Neo4jGraph,
    mongo_client: mongodb::Client,
}

impl Stores {
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let pg = postgres::connect(&config.stores.postgres_url).await?;
        let mongo_client = mongo::connect(&config.stores.mongo_uri).await?;
        let carts = mongo::MongoCarts::new(
            &mongo_client,
            &config.mongo.database,
            &config.mongo.cart_collection,
        );
        let graph = neo4j::Neo4jGraph::connect(
            &config.stores.neo4j_uri,
            &config.stores.neo4j_user,
            &config.stores.neo4j_password,
            &config.graph.database,
        )
        .await?;

        Ok(Self {
            catalog: postgres::PgCatalog::new(pg.clone()),
            pg,
            carts,
            graph,
            mongo_client,
        })
    }

    /// Ping all three stores. Any failure is fatal at startup.
    pub async fn verify(&self) -> Result<(), StoreError> {
        postgres::ping(&self.pg).await?;
        mongo::ping(&self.mongo_client).await?;
        self.graph.ping().await?;
        Ok(())
    }

    pub async fn shutdown(self) {
        self.pg.close().await;
        self.mongo_client.shutdown().await;
        // neo4rs releases its connections on drop
    }
}
