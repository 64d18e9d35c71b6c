use {
    super::Repository,
    crate::{
        api::RestError,
        kernel::db::with_deadline,
        order::entities,
    },
};

impl Repository {
    pub async fn update_order_item_uri(
        &self,
        id: entities::OrderRecordId,
        uri: &str,
    ) -> Result<u64, RestError> {
        with_deadline(
            self.deadlines.write,
            "update_order_item_uri",
            self.db.update_order_item_uri(id, uri),
        )
        .await
    }
}
