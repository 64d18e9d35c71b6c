use {
    crate::{
        auction::AuctionId,
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

pub type BidId = String;

/// A sealed bid submitted against an auction.
#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
pub struct Bid {
    /// The unique id of the bid, chosen by the bidder.
    #[serde(rename = "bidid")]
    #[schema(example = "bid-42")]
    pub bid_id:        BidId,
    /// The auction this bid is placed on.
    #[serde(rename = "auctionid")]
    #[schema(example = "auction-2024-0001")]
    pub auction_id:    AuctionId,
    /// The offered price, kept exactly as submitted.
    #[serde(default)]
    #[schema(example = "1250.00")]
    pub price:         String,
    #[serde(default)]
    #[schema(example = 10)]
    pub quantity:      i64,
    #[serde(rename = "deliverydate", default, with = "crate::serde::nullable_datetime")]
    #[schema(example = "2024-06-01T00:00:00Z", value_type = Option<String>)]
    pub delivery_date: Option<OffsetDateTime>,
    /// Opaque routing address of the bidder.
    #[serde(rename = "onion", default)]
    #[schema(example = "bidder3k2j.onion")]
    pub submitter:     String,
    /// The time the bid was received. Stamped by the server when not provided.
    #[serde(rename = "responsedate", default, with = "crate::serde::nullable_datetime")]
    #[schema(example = "2024-05-01T13:00:00Z", value_type = Option<String>)]
    pub response_date: Option<OffsetDateTime>,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
#[response(description = "The bids placed on an auction")]
pub struct Bids(pub Vec<Bid>);

#[derive(Serialize, Deserialize, IntoParams, Clone, Debug)]
#[into_params(parameter_in = Path)]
pub struct GetBidListParams {
    #[param(example = "auction-2024-0001")]
    pub auction_id: AuctionId,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "addBid")]
    AddBid,
    #[strum(serialize = "getBidList/:auction_id")]
    GetBidList,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        let method = match self {
            Route::AddBid => http::Method::POST,
            Route::GetBidList => http::Method::GET,
        };
        RouteProperties {
            method,
            full_path: self.as_ref().to_string(),
        }
    }
}
