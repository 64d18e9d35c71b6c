use {
    super::Repository,
    crate::{
        api::RestError,
        auction::entities,
        kernel::db::with_deadline,
    },
};

impl Repository {
    pub async fn get_auctions(
        &self,
        selection: entities::AuctionSelection,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let auctions = with_deadline(
            self.deadlines.read,
            "get_auctions",
            self.db.get_auctions(&selection),
        )
        .await?;
        // Stored rows may carry an empty winner id. The entity predicate is authoritative.
        Ok(auctions
            .into_iter()
            .map(entities::Auction::from)
            .filter(|auction| selection.matches(auction))
            .collect())
    }
}
