//! Document store adapter: cart snapshot reads and BSON conversion.
//!
//! Cart documents are stored with string product ids and BSON dates (they
//! are written by a different service). Conversion to the typed domain model
//! happens here, at the adapter boundary, and a document that does not match
//! the model is reported as malformed rather than silently skipped.

use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures_util::TryStreamExt;
use mongodb::{Client, Collection};
use serde::Deserialize;
use uuid::Uuid;

use super::CartStore;
use crate::domain::{CartDocument, CartLine};
use crate::error::{StoreError, StoreKind};

pub async fn connect(uri: &str) -> Result<Client, StoreError> {
    Client::with_uri_str(uri)
        .await
        .map_err(|e| StoreError::unavailable(StoreKind::Mongo, e))
}

pub async fn ping(client: &Client) -> Result<(), StoreError> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| StoreError::unavailable(StoreKind::Mongo, e))?;
    Ok(())
}

/// Cart snapshot reader over one collection.
pub struct MongoCarts {
    collection: Collection<CartRecord>,
}

impl MongoCarts {
    pub fn new(client: &Client, database: &str, collection: &str) -> Self {
        Self {
            collection: client.database(database).collection(collection),
        }
    }
}

/// Wire shape of a stored cart.
#[derive(Debug, Deserialize)]
struct CartRecord {
    #[serde(rename = "_id")]
    id: ObjectId,
    user_id: String,
    updated_at: bson::DateTime,
    #[serde(default)]
    items: Vec<ItemRecord>,
}

#[derive(Debug, Deserialize)]
struct ItemRecord {
    product_id: String,
    quantity: i64,
}

fn to_domain(record: CartRecord) -> Result<CartDocument, StoreError> {
    let cart_id = record.id.to_hex();
    let lines = record
        .items
        .into_iter()
        .map(|item| {
            let product_id = Uuid::parse_str(&item.product_id).map_err(|_| {
                StoreError::malformed(
                    StoreKind::Mongo,
                    format!("cart {cart_id}: bad product id {:?}", item.product_id),
                )
            })?;
            let quantity = u32::try_from(item.quantity)
                .ok()
                .filter(|q| *q > 0)
                .ok_or_else(|| {
                    StoreError::malformed(
                        StoreKind::Mongo,
                        format!("cart {cart_id}: bad quantity {}", item.quantity),
                    )
                })?;
            Ok(CartLine {
                product_id,
                quantity,
            })
        })
        .collect::<Result<Vec<_>, StoreError>>()?;

    Ok(CartDocument {
        cart_id,
        user_id: record.user_id,
        updated_at: record.updated_at.to_chrono(),
        lines,
    })
}

#[async_trait]
impl CartStore for MongoCarts {
    async fn active_carts(&self) -> Result<Vec<CartDocument>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::query(StoreKind::Mongo, e))?;
        let records: Vec<CartRecord> = cursor
            .try_collect()
            .await
            .map_err(|e| StoreError::query(StoreKind::Mongo, e))?;

        records.into_iter().map(to_domain).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(items: Vec<ItemRecord>) -> CartRecord {
        CartRecord {
            id: ObjectId::new(),
            user_id: "u-1".into(),
            updated_at: bson::DateTime::from_chrono(
                Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap(),
            ),
            items,
        }
    }

    #[test]
    fn converts_a_well_formed_record() {
        let id = Uuid::from_u128(42);
        let cart = to_domain(record(vec![ItemRecord {
            product_id: id.to_string(),
            quantity: 3,
        }]))
        .unwrap();

        assert_eq!(cart.user_id, "u-1");
        assert_eq!(cart.lines, vec![CartLine { product_id: id, quantity: 3 }]);
        assert_eq!(
            cart.updated_at,
            Utc.with_ymd_and_hms(2026, 8, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn empty_item_list_is_a_valid_cart() {
        let cart = to_domain(record(vec![])).unwrap();
        assert!(cart.lines.is_empty());
    }

    #[test]
    fn rejects_non_uuid_product_id() {
        let result = to_domain(record(vec![ItemRecord {
            product_id: "not-a-uuid".into(),
            quantity: 1,
        }]));

        assert!(matches!(
            result,
            Err(StoreError::Malformed {
                store: StoreKind::Mongo,
                ..
            })
        ));
    }

    #[test]
    fn rejects_zero_and_negative_quantities() {
        for quantity in [0, -2] {
            let result = to_domain(record(vec![ItemRecord {
                product_id: Uuid::from_u128(1).to_string(),
                quantity,
            }]));
            assert!(result.is_err(), "quantity {quantity} accepted");
        }
    }
}
