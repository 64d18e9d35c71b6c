use {
    super::service::update_order_uri::UpdateOrderUriInput,
    crate::{
        api::{
            Json,
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    auction_manager_api_types::{
        order::{
            OrderUriUpdate,
            OrderUriUpdateResult,
            Route,
        },
        ErrorBodyResponse,
    },
    axum::{
        extract::State,
        Router,
    },
    std::sync::Arc,
};

/// Record the location of the cloned data object of an order item.
///
/// The order item is looked up by its GUID. An unknown GUID reports zero updated orders.
#[utoipa::path(put, path = "/updateOrderUri", request_body = OrderUriUpdate,
    responses(
        (status = 200, response = OrderUriUpdateResult),
        (status = 400, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "order",
)]
pub async fn put_update_order_uri(
    State(store): State<Arc<Store>>,
    Json(update): Json<OrderUriUpdate>,
) -> Result<Json<OrderUriUpdateResult>, RestError> {
    tracing::debug!(entity = update.entity, "Updating order item location");
    let result = store
        .order_service
        .update_order_uri(UpdateOrderUriInput {
            guid: update.guid,
            uri:  update.uri,
        })
        .await?;
    Ok(Json(OrderUriUpdateResult {
        guid:    result.guid.to_string(),
        updated: result.updated,
    }))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::UpdateOrderUri, put_update_order_uri)
        .router
}
