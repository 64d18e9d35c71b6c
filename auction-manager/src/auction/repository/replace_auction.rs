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
    pub async fn replace_auction(&self, auction: &entities::Auction) -> Result<(), RestError> {
        let model = models::Auction::from(auction);
        with_deadline(
            self.deadlines.write,
            "replace_auction",
            self.db.replace_auction(&model),
        )
        .await
    }
}
