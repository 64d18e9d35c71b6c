use {
    super::Service,
    crate::{
        api::RestError,
        order::entities,
    },
    uuid::Uuid,
};

pub struct UpdateOrderUriInput {
    pub guid: String,
    pub uri:  String,
}

impl Service {
    /// Points the order item with the given GUID at a new location.
    ///
    /// An unknown GUID is not an error and reports zero updated orders.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(guid = %input.guid))]
    pub async fn update_order_uri(
        &self,
        input: UpdateOrderUriInput,
    ) -> Result<entities::OrderUriUpdateResult, RestError> {
        let guid = Uuid::parse_str(input.guid.trim())
            .map_err(|_| RestError::BadParameters("invalid GUID format".to_string()))?;
        let uri = input.uri.trim();
        if uri.is_empty() {
            return Err(RestError::BadParameters("URI cannot be empty".to_string()));
        }

        let not_updated = entities::OrderUriUpdateResult { guid, updated: 0 };
        match self.repo.count_orders_by_item_guid(guid).await? {
            0 => {
                tracing::info!(guid = %guid, "No order found for item");
                return Ok(not_updated);
            }
            1 => {}
            count => {
                tracing::error!(guid = %guid, count, "Order item GUID is not unique");
                return Err(RestError::Conflict(format!(
                    "multiple orders ({}) found with GUID {}",
                    count, guid
                )));
            }
        }

        let Some(order) = self.repo.get_order_by_item_guid(guid).await? else {
            tracing::warn!(guid = %guid, "Order disappeared before its item location was updated");
            return Ok(not_updated);
        };
        let updated = self.repo.update_order_item_uri(order.id, uri).await?;
        tracing::info!(
            guid = %guid,
            order_id = order.order_id,
            updated,
            "Order item location updated"
        );
        Ok(entities::OrderUriUpdateResult { guid, updated })
    }
}
