use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Service {
    /// Auctions that have not been started yet.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn get_start_list(&self) -> Result<Vec<entities::Auction>, RestError> {
        self.repo
            .get_auctions(entities::AuctionSelection::StartCandidates)
            .await
    }
}
