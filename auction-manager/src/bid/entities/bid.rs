use {
    crate::auction::entities::AuctionId,
    time::OffsetDateTime,
};

pub type BidId = String;

#[derive(Clone, Debug, PartialEq)]
pub struct Bid {
    pub id:            BidId,
    pub auction_id:    AuctionId,
    pub price:         String,
    pub quantity:      i64,
    pub delivery_date: Option<OffsetDateTime>,
    pub submitter:     String,
    pub response_date: OffsetDateTime,
}

/// A bid as submitted, before the server stamps the response date.
#[derive(Clone, Debug, PartialEq)]
pub struct BidCreate {
    pub id:            BidId,
    pub auction_id:    AuctionId,
    pub price:         String,
    pub quantity:      i64,
    pub delivery_date: Option<OffsetDateTime>,
    pub submitter:     String,
    pub response_date: Option<OffsetDateTime>,
}

impl BidCreate {
    pub fn into_bid(self, received_at: OffsetDateTime) -> Bid {
        Bid {
            id:            self.id,
            auction_id:    self.auction_id,
            price:         self.price,
            quantity:      self.quantity,
            delivery_date: self.delivery_date,
            submitter:     self.submitter,
            response_date: self.response_date.unwrap_or(received_at),
        }
    }
}
