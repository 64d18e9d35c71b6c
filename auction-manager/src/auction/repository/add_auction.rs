use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn add_auction(
        &self,
        auction: entities::Auction,
    ) -> Result<entities::Auction, RestError> {
        let model = models::Auction::from(&auction);
        with_deadline(
            self.deadlines.write,
            "add_auction",
            self.db.add_auction(&model),
        )
        .await?;
        Ok(auction)
    }
}
