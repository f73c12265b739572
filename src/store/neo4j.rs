//! Graph store adapter: distinct-neighbor ranking over purchase edges.

use async_trait::async_trait;
use neo4rs::{query, ConfigBuilder, Graph};

use super::PurchaseGraphStore;
use crate::domain::ConnectionCount;
use crate::error::{StoreError, StoreKind};

pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    pub async fn connect(
        uri: &str,
        user: &str,
        password: &str,
        database: &str,
    ) -> Result<Self, StoreError> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .build()
            .map_err(|e| StoreError::unavailable(StoreKind::Neo4j, e))?;
        let graph = Graph::connect(config)
            .await
            .map_err(|e| StoreError::unavailable(StoreKind::Neo4j, e))?;

        Ok(Self { graph })
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        self.graph
            .run(query("RETURN 1"))
            .await
            .map_err(|e| StoreError::unavailable(StoreKind::Neo4j, e))
    }
}

/// Labels and relationship types cannot be Cypher parameters, so they are
/// interpolated — but only after passing this check, which admits plain
/// identifiers and nothing else.
fn valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Bolt integers arrive as `i64`; a distinct-neighbor count is non-negative
/// by construction, so anything below zero is clamped rather than wrapped.
fn normalize_count(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(0)
}

#[async_trait]
impl PurchaseGraphStore for Neo4jGraph {
    async fn top_by_distinct_connections(
        &self,
        relationship: &str,
        target_label: &str,
        limit: i64,
    ) -> Result<Vec<ConnectionCount>, StoreError> {
        for (what, name) in [("relationship", relationship), ("label", target_label)] {
            if !valid_identifier(name) {
                return Err(StoreError::query(
                    StoreKind::Neo4j,
                    format!("invalid {what} identifier: {name:?}"),
                ));
            }
        }

        let cypher = format!(
            "MATCH (n)-[:{relationship}]->(t:{target_label}) \
             RETURN t.title AS entity, count(DISTINCT n) AS connections \
             ORDER BY connections DESC LIMIT $limit"
        );

        let mut rows = self
            .graph
            .execute(query(&cypher).param("limit", limit))
            .await
            .map_err(|e| StoreError::query(StoreKind::Neo4j, e))?;

        let mut ranking = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| StoreError::query(StoreKind::Neo4j, e))?
        {
            let entity: String = row
                .get("entity")
                .map_err(|e| StoreError::malformed(StoreKind::Neo4j, e.to_string()))?;
            let connections: i64 = row
                .get("connections")
                .map_err(|e| StoreError::malformed(StoreKind::Neo4j, e.to_string()))?;
            ranking.push(ConnectionCount {
                entity,
                count: normalize_count(connections),
            });
        }

        Ok(ranking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_identifiers() {
        for name in ["PURCHASED", "Product", "has_tag_2", "_x"] {
            assert!(valid_identifier(name), "{name} rejected");
        }
    }

    #[test]
    fn rejects_injection_shaped_identifiers() {
        for name in ["", "1abc", "Prod uct", "x]->(m) DETACH DELETE m //", "a-b"] {
            assert!(!valid_identifier(name), "{name:?} accepted");
        }
    }

    #[test]
    fn counts_normalize_to_host_integers() {
        assert_eq!(normalize_count(0), 0);
        assert_eq!(normalize_count(42), 42);
        assert_eq!(normalize_count(i64::MAX), i64::MAX as u64);
        assert_eq!(normalize_count(-1), 0);
    }
}
