use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
};

impl Service {
    /// Stopped auctions that have no winner yet.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE))]
    pub async fn get_awaiting_winner_list(&self) -> Result<Vec<entities::Auction>, RestError> {
        self.repo
            .get_auctions(entities::AuctionSelection::AwaitingWinner)
            .await
    }
}
