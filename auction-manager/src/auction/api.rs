use {
    super::{
        entities,
        service::{
            create_auction::CreateAuctionInput,
            get_stop_list::GetStopListInput,
            set_auction_winner::SetAuctionWinnerInput,
            start_auction::StartAuctionInput,
            stop_auction::StopAuctionInput,
        },
    },
    crate::{
        api::{
            Json,
            Path,
            RestError,
            WrappedRouter,
        },
        kernel::entities::{
            parse_id,
            parse_timestamp,
        },
        state::Store,
    },
    auction_manager_api_types::{
        auction::{
            Auction,
            AuctionId,
            Auctions,
            GetStopListParams,
            Route,
            SetAuctionWinnerParams,
            StartAuctionParams,
            StopAuctionParams,
        },
        ErrorBodyResponse,
    },
    axum::{
        extract::State,
        http::StatusCode,
        Router,
    },
    std::sync::Arc,
};

/// Create a new auction for a purchase order.
///
/// The auction must not carry a start date, an end date or a winning bid. Returns the id of the new auction.
#[utoipa::path(post, path = "/createAuction", request_body = Auction,
    responses(
        (status = 200, description = "The id of the created auction", body = String),
        (status = 400, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn post_create_auction(
    State(store): State<Arc<Store>>,
    Json(auction): Json<Auction>,
) -> Result<Json<AuctionId>, RestError> {
    let auction = store
        .auction_service
        .create_auction(CreateAuctionInput {
            auction: auction.into(),
        })
        .await?;
    Ok(Json(auction.id))
}

/// List the auctions that have not been started yet.
#[utoipa::path(get, path = "/getStartList",
    responses(
        (status = 200, response = Auctions),
        (status = 500, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn get_start_list(State(store): State<Arc<Store>>) -> Result<Json<Auctions>, RestError> {
    let auctions = store.auction_service.get_start_list().await?;
    Ok(Json(to_auctions(auctions)))
}

/// List the open auctions that started at least `duration` seconds ago.
#[utoipa::path(get, path = "/getStopList/{duration}",
    params(GetStopListParams),
    responses(
        (status = 200, response = Auctions),
        (status = 400, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn get_stop_list(
    State(store): State<Arc<Store>>,
    Path(params): Path<GetStopListParams>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store
        .auction_service
        .get_stop_list(GetStopListInput {
            duration: params.duration,
        })
        .await?;
    Ok(Json(to_auctions(auctions)))
}

/// Start an auction at the given time.
#[utoipa::path(put, path = "/startAuction/{auction_id}/{start_time}",
    params(StartAuctionParams),
    responses(
        (status = 200, description = "The auction was started"),
        (status = 400, response = ErrorBodyResponse),
        (status = 404, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn put_start_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<StartAuctionParams>,
) -> Result<StatusCode, RestError> {
    store
        .auction_service
        .start_auction(StartAuctionInput {
            auction_id: parse_id("auction id", &params.auction_id)?,
            start_time: parse_timestamp("start time", &params.start_time)?,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// Stop an auction at the given time.
#[utoipa::path(put, path = "/stopAuction/{auction_id}/{end_time}",
    params(StopAuctionParams),
    responses(
        (status = 200, description = "The auction was stopped"),
        (status = 400, response = ErrorBodyResponse),
        (status = 404, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn put_stop_auction(
    State(store): State<Arc<Store>>,
    Path(params): Path<StopAuctionParams>,
) -> Result<StatusCode, RestError> {
    store
        .auction_service
        .stop_auction(StopAuctionInput {
            auction_id: parse_id("auction id", &params.auction_id)?,
            end_time:   parse_timestamp("end time", &params.end_time)?,
        })
        .await?;
    Ok(StatusCode::OK)
}

/// List the stopped auctions that have no winner yet.
#[utoipa::path(get, path = "/getAwaitingWinnerList",
    responses(
        (status = 200, response = Auctions),
        (status = 500, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn get_awaiting_winner_list(
    State(store): State<Arc<Store>>,
) -> Result<Json<Auctions>, RestError> {
    let auctions = store.auction_service.get_awaiting_winner_list().await?;
    Ok(Json(to_auctions(auctions)))
}

/// Record the winning bid of a stopped auction.
#[utoipa::path(put, path = "/setAuctionWinner/{auction_id}/{bid_id}",
    params(SetAuctionWinnerParams),
    responses(
        (status = 200, description = "The winner was recorded"),
        (status = 400, response = ErrorBodyResponse),
        (status = 404, response = ErrorBodyResponse),
        (status = 409, response = ErrorBodyResponse),
    ),
    tag = "auction",
)]
pub async fn put_set_auction_winner(
    State(store): State<Arc<Store>>,
    Path(params): Path<SetAuctionWinnerParams>,
) -> Result<StatusCode, RestError> {
    store
        .auction_service
        .set_auction_winner(SetAuctionWinnerInput {
            auction_id: parse_id("auction id", &params.auction_id)?,
            bid_id:     parse_id("bid id", &params.bid_id)?,
        })
        .await?;
    Ok(StatusCode::OK)
}

pub fn get_routes(store: Arc<Store>) -> Router<Arc<Store>> {
    WrappedRouter::new(store)
        .route(Route::CreateAuction, post_create_auction)
        .route(Route::GetStartList, get_start_list)
        .route(Route::GetStopList, get_stop_list)
        .route(Route::StartAuction, put_start_auction)
        .route(Route::StopAuction, put_stop_auction)
        .route(Route::GetAwaitingWinnerList, get_awaiting_winner_list)
        .route(Route::SetAuctionWinner, put_set_auction_winner)
        .router
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:          auction.auction_id,
            order_id:    auction.order_id,
            start_date:  auction.start_date,
            end_date:    auction.end_date,
            winning_bid: auction.winning_bid,
            subscribed:  auction.subscribed,
            cloned:      auction.cloned,
        }
    }
}

impl From<entities::Auction> for Auction {
    fn from(auction: entities::Auction) -> Self {
        Self {
            auction_id:  auction.id,
            order_id:    auction.order_id,
            start_date:  auction.start_date,
            end_date:    auction.end_date,
            winning_bid: auction.winning_bid,
            subscribed:  auction.subscribed,
            cloned:      auction.cloned,
        }
    }
}

fn to_auctions(auctions: Vec<entities::Auction>) -> Auctions {
    Auctions(auctions.into_iter().map(Auction::from).collect())
}
