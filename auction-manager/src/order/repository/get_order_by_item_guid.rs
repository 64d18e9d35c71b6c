use {
    super::Repository,
    crate::{
        api::RestError,
        kernel::db::with_deadline,
        order::entities,
    },
    uuid::Uuid,
};

impl Repository {
    pub async fn get_order_by_item_guid(
        &self,
        guid: Uuid,
    ) -> Result<Option<entities::Order>, RestError> {
        let order = with_deadline(
            self.deadlines.read,
            "get_order_by_item_guid",
            self.db.get_order_by_item_guid(guid),
        )
        .await?;
        Ok(order.map(entities::Order::from))
    }
}
