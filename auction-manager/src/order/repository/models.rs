#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::{
            query_error,
            DB,
        },
    },
    axum::async_trait,
    sqlx::FromRow,
    std::fmt::Debug,
    uuid::Uuid,
};

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Order {
    pub id:        Uuid,
    pub order_id:  String,
    pub item_guid: Uuid,
    pub item_uri:  String,
}

impl From<Order> for entities::Order {
    fn from(order: Order) -> Self {
        Self {
            id:        order.id,
            order_id:  order.order_id,
            item_guid: order.item_guid,
            item_uri:  order.item_uri,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn count_orders_by_item_guid(&self, guid: Uuid) -> Result<i64, RestError>;
    async fn get_order_by_item_guid(&self, guid: Uuid) -> Result<Option<Order>, RestError>;
    /// Returns the number of orders whose item location changed.
    async fn update_order_item_uri(
        &self,
        id: entities::OrderRecordId,
        uri: &str,
    ) -> Result<u64, RestError>;
}

#[async_trait]
impl Database for DB {
    async fn count_orders_by_item_guid(&self, guid: Uuid) -> Result<i64, RestError> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM purchase_order WHERE lower(order_item ->> 'guid') = $1",
        )
        .bind(guid.to_string())
        .fetch_one(self)
        .await
        .map_err(|e| query_error(e, String::new))
    }

    async fn get_order_by_item_guid(&self, guid: Uuid) -> Result<Option<Order>, RestError> {
        sqlx::query_as("SELECT id, order_id, (order_item ->> 'guid')::uuid AS item_guid, COALESCE(order_item ->> 'uri', '') AS item_uri FROM purchase_order WHERE lower(order_item ->> 'guid') = $1 LIMIT 1")
            .bind(guid.to_string())
            .fetch_optional(self)
            .await
            .map_err(|e| query_error(e, String::new))
    }

    async fn update_order_item_uri(
        &self,
        id: entities::OrderRecordId,
        uri: &str,
    ) -> Result<u64, RestError> {
        let result = sqlx::query("UPDATE purchase_order SET order_item = jsonb_set(order_item, '{uri}', to_jsonb($2::text)) WHERE id = $1 AND order_item ->> 'uri' IS DISTINCT FROM $2")
            .bind(id)
            .bind(uri)
            .execute(self)
            .await
            .map_err(|e| query_error(e, String::new))?;
        Ok(result.rows_affected())
    }
}
