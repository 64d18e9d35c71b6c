use {
    crate::{
        bid::BidId,
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    time::OffsetDateTime,
    utoipa::{
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

pub type AuctionId = String;
pub type OrderId = String;

/// A sealed-bid auction for a purchase order.
///
/// The lifecycle state is derived from the dates and the winning bid:
/// no start date means the auction has not started, a start date without an end date means it is open,
/// an end date without a winning bid means it is waiting for a winner to be selected.
#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Auction {
    /// The unique id of the auction, chosen by the creator.
    #[serde(rename = "auctionid")]
    #[schema(example = "auction-2024-0001")]
    pub auction_id:  AuctionId,
    /// The id of the purchase order this auction is for.
    #[serde(rename = "orderid")]
    #[schema(example = "order-7731")]
    pub order_id:    OrderId,
    /// The time the auction was started. Unset until the auction is started.
    #[serde(rename = "startdate", default, with = "crate::serde::nullable_datetime")]
    #[schema(example = "2024-05-01T12:00:00Z", value_type = Option<String>)]
    pub start_date:  Option<OffsetDateTime>,
    /// The time the auction was stopped. Unset until the auction is stopped.
    #[serde(rename = "enddate", default, with = "crate::serde::nullable_datetime")]
    #[schema(example = "2024-05-02T12:00:00Z", value_type = Option<String>)]
    pub end_date:    Option<OffsetDateTime>,
    /// The id of the winning bid. Unset until a winner is selected.
    #[serde(rename = "winningbid", default, with = "crate::serde::nullable_id")]
    #[schema(example = "bid-42", value_type = Option<String>)]
    pub winning_bid: Option<BidId>,
    #[serde(default)]
    pub subscribed:  bool,
    #[serde(default)]
    pub cloned:      bool,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
#[response(description = "The auctions matching the requested lifecycle state")]
pub struct Auctions(pub Vec<Auction>);

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct GetStopListParams {
    /// Only auctions that have been open for at least this many seconds are listed.
    #[param(example = "3600", value_type = String)]
    pub duration: String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct StartAuctionParams {
    #[param(example = "auction-2024-0001")]
    pub auction_id: AuctionId,
    /// The start time in RFC3339 format.
    #[param(example = "2024-05-01T12:00:00Z")]
    pub start_time: String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct StopAuctionParams {
    #[param(example = "auction-2024-0001")]
    pub auction_id: AuctionId,
    /// The end time in RFC3339 format.
    #[param(example = "2024-05-02T12:00:00Z")]
    pub end_time:   String,
}

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct SetAuctionWinnerParams {
    #[param(example = "auction-2024-0001")]
    pub auction_id: AuctionId,
    #[param(example = "bid-42")]
    pub bid_id:     BidId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "createAuction")]
    CreateAuction,
    #[strum(serialize = "getStartList")]
    GetStartList,
    #[strum(serialize = "getStopList/:duration")]
    GetStopList,
    #[strum(serialize = "startAuction/:auction_id/:start_time")]
    StartAuction,
    #[strum(serialize = "stopAuction/:auction_id/:end_time")]
    StopAuction,
    #[strum(serialize = "getAwaitingWinnerList")]
    GetAwaitingWinnerList,
    #[strum(serialize = "setAuctionWinner/:auction_id/:bid_id")]
    SetAuctionWinner,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let method = match self {
            Route::CreateAuction => http::Method::POST,
            Route::StartAuction | Route::StopAuction | Route::SetAuctionWinner => {
                http::Method::PUT
            }
            Route::GetStartList | Route::GetStopList | Route::GetAwaitingWinnerList => {
                http::Method::GET
            }
        };
        RouteProperties {
            method,
            full_path: self.as_ref().to_string(),
        }
    }
}
