//! Catalog lookup service: one batched query per report invocation.

use std::collections::BTreeSet;
use uuid::Uuid;

use super::CatalogStore;
use crate::domain::CatalogMap;
use crate::error::StoreError;

/// Resolve a deduplicated id set to a [`CatalogMap`].
///
/// An empty set short-circuits to an empty map without touching the store
/// (there is no valid `= ANY` of nothing to issue). A store failure
/// propagates as-is; this never returns a partial map. Ids the store has no
/// row for are simply absent from the result — that is the unresolved case
/// the correlation engine is built around.
pub async fn resolve(
    store: &dyn CatalogStore,
    product_ids: &BTreeSet<Uuid>,
) -> Result<CatalogMap, StoreError> {
    if product_ids.is_empty() {
        return Ok(CatalogMap::new());
    }

    let ids: Vec<Uuid> = product_ids.iter().copied().collect();
    let entries = store.fetch_entries(&ids).await?;

    // Last write wins should the store ever hand back duplicate rows; it
    // cannot with a primary-key-backed source.
    Ok(entries
        .into_iter()
        .map(|entry| (entry.product_id, entry))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreKind;
    use crate::testkit::RecordingCatalog;
    use rust_decimal_macros::dec;

    fn uid(n: u128) -> Uuid {
        Uuid::from_u128(n)
    }

    #[tokio::test]
    async fn empty_id_set_issues_no_query() {
        let store = RecordingCatalog::default();

        let map = resolve(&store, &BTreeSet::new()).await.unwrap();

        assert!(map.is_empty());
        assert_eq!(store.fetch_calls(), 0);
    }

    #[tokio::test]
    async fn one_query_carries_the_whole_id_set() {
        let store = RecordingCatalog::default()
            .with_entry(uid(1), "A", dec!(10))
            .with_entry(uid(2), "B", dec!(20));
        let ids = BTreeSet::from([uid(1), uid(2), uid(3)]);

        let map = resolve(&store, &ids).await.unwrap();

        assert_eq!(store.fetch_calls(), 1);
        assert_eq!(store.batch_sizes(), vec![3]);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&uid(1)].title, "A");
        assert!(!map.contains_key(&uid(3)));
    }

    #[tokio::test]
    async fn store_failure_propagates_without_a_partial_map() {
        let store = RecordingCatalog::failing();
        let ids = BTreeSet::from([uid(1)]);

        let result = resolve(&store, &ids).await;

        assert!(matches!(
            result,
            Err(StoreError::Query {
                store: StoreKind::Postgres,
                ..
            })
        ));
    }
}
