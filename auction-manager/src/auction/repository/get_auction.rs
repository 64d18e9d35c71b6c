use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn get_auction(
        &self,
        auction_id: &entities::AuctionId,
    ) -> Result<entities::Auction, RestError> {
        let auction = with_deadline(
            self.deadlines.read,
            "get_auction",
            self.db.get_auction(auction_id),
        )
        .await?;
        Ok(auction.into())
    }
}
