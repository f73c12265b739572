//! Purchase-graph ranking: products by distinct buyers.

use tabled::{Table, Tabled};

use crate::error::StoreError;
use crate::store::PurchaseGraphStore;

/// Relationship and label the commerce graph uses for purchases.
pub const PURCHASED_RELATIONSHIP: &str = "PURCHASED";
pub const PRODUCT_LABEL: &str = "Product";

#[derive(Tabled)]
struct ConnectionRow {
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Distinct buyers")]
    buyers: u64,
}

pub async fn run(graph: &dyn PurchaseGraphStore, limit: i64) -> Result<String, StoreError> {
    let ranking = graph
        .top_by_distinct_connections(PURCHASED_RELATIONSHIP, PRODUCT_LABEL, limit)
        .await?;

    if ranking.is_empty() {
        return Ok("No products with recorded buyers.\n".into());
    }

    let rows: Vec<ConnectionRow> = ranking
        .into_iter()
        .map(|entry| ConnectionRow {
            product: entry.entity,
            buyers: entry.count,
        })
        .collect();

    Ok(format!("{}\n", Table::new(rows)))
}
