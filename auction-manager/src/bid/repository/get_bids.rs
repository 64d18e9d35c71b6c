use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn get_bids(&self, auction_id: &AuctionId) -> Result<Vec<entities::Bid>, RestError> {
        let bids = with_deadline(
            self.deadlines.read,
            "get_bids",
            self.db.get_bids(auction_id),
        )
        .await?;
        Ok(bids.into_iter().map(entities::Bid::from).collect())
    }
}
