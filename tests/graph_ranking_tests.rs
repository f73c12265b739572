//! Contract tests for the purchase-graph ranking against the in-memory
//! graph fake.

use marketlens::report::connections;
use marketlens::store::PurchaseGraphStore;
use marketlens::testkit::StaticGraph;

#[tokio::test]
async fn ranking_is_descending_and_truncated() {
    let graph = StaticGraph::new(vec![("P1", 5), ("P2", 5), ("P3", 2)]);

    let ranking = graph
        .top_by_distinct_connections("PURCHASED", "Product", 2)
        .await
        .unwrap();

    assert_eq!(ranking.len(), 2);
    let entities: Vec<&str> = ranking.iter().map(|r| r.entity.as_str()).collect();
    assert!(entities.contains(&"P1"));
    assert!(entities.contains(&"P2"));
    assert!(!entities.contains(&"P3"));
}

#[tokio::test]
async fn ties_keep_a_stable_order_within_one_call() {
    let graph = StaticGraph::new(vec![("P1", 5), ("P2", 5), ("P3", 2)]);

    let first = graph
        .top_by_distinct_connections("PURCHASED", "Product", 3)
        .await
        .unwrap();
    let second = graph
        .top_by_distinct_connections("PURCHASED", "Product", 3)
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(first[0].entity, "P1");
    assert_eq!(first[1].entity, "P2");
    assert_eq!(first[2].entity, "P3");
}

#[tokio::test]
async fn rendered_ranking_shows_counts() {
    let graph = StaticGraph::new(vec![("Gaming Mouse", 7), ("Keyboard", 3)]);

    let text = connections::run(&graph, 10).await.unwrap();

    assert!(text.contains("Gaming Mouse"));
    assert!(text.contains('7'));
    assert!(text.contains("Distinct buyers"));
}
