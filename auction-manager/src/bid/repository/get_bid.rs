use {
    super::Repository,
    crate::{
        api::RestError,
        bid::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn get_bid(&self, bid_id: &entities::BidId) -> Result<entities::Bid, RestError> {
        let bid = with_deadline(self.deadlines.read, "get_bid", self.db.get_bid(bid_id)).await?;
        Ok(bid.into())
    }
}
