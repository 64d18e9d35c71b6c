use {
    super::Repository,
    crate::{
        api::RestError,
        kernel::db::with_deadline,
    },
    uuid::Uuid,
};

impl Repository {
    pub async fn count_orders_by_item_guid(&self, guid: Uuid) -> Result<i64, RestError> {
        with_deadline(
            self.deadlines.read,
            "count_orders_by_item_guid",
            self.db.count_orders_by_item_guid(guid),
        )
        .await
    }
}
