use {
    super::{
        entities,
        service::{
            add_bid::AddBidInput,
            get_bids::GetBidsInput,
        },
    },
    crate::{
        api::{
            Json,
            Path,
            RestError,
            WrappedRouter,
        },
        state::Store,
    },
    auction_manager_api_types::{
        bid::{
            Bid,
            BidId,
            Bids,
            GetBidListParams,
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

/// Submit a sealed bid for an auction.
///
/// The bid is stored as submitted. When no response date is given the server stamps the time of receipt.
/// Returns the id of the stored bid.
#[utoipa::path(post, path = "/addBid", request_body = Bid,
    responses(
        (status = 200, description = "The id of the stored bid", body = String),
        (status = 400, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn post_add_bid(
    State(store): State<Arc<Store>>,
    Json(bid): Json<Bid>,
) -> Result<Json<BidId>, RestError> {
    let bid = store
        .bid_service
        .add_bid(AddBidInput {
            bid_create: bid.into(),
        })
        .await?;
    Ok(Json(bid.id))
}

/// List every bid placed on an auction.
#[utoipa::path(get, path = "/getBidList/{auction_id}",
    params(GetBidListParams),
    responses(
        (status = 200, response = Bids),
        (status = 400, response = ErrorBodyResponse),
    ),
    tag = "bid",
)]
pub async fn get_bid_list(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetBidListParams>,
) -> Result<Json<Bids>, RestError> {
    let bids = store
        .bid_service
        .get_bids(GetBidsInput {
            auction_id: params.auction_id,
        })
        .await?;
    Ok(Json(Bids(bids.into_iter().map(Bid::from).collect())))
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::AddBid, post_add_bid)
        .route(Route::GetBidList, get_bid_list)
        .router
}

impl From<Bid> for entities::BidCreate {
    fn from(bid: Bid) -> Self {
        Self {
            id:            bid.bid_id,
            auction_id:    bid.auction_id,
            price:         bid.price,
            quantity:      bid.quantity,
            delivery_date: bid.delivery_date,
            submitter:     bid.submitter,
            response_date: bid.response_date,
        }
    }
}

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
        Self {
            bid_id:        bid.id,
            auction_id:    bid.auction_id,
            price:         bid.price,
            quantity:      bid.quantity,
            delivery_date: bid.delivery_date,
            submitter:     bid.submitter,
            response_date: Some(bid.response_date),
        }
    }
}
