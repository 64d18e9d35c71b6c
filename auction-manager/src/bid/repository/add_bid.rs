use {
    super::{
        models,
        Repository,
    },
    crate::{
        api::RestError,
        bid::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn add_bid(&self, bid: entities::Bid) -> Result<entities::Bid, RestError> {
        let model = models::Bid::from(&bid);
        with_deadline(self.deadlines.write, "add_bid", self.db.add_bid(&model)).await?;
        Ok(bid)
    }
}
