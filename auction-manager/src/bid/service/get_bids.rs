use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        bid::entities,
    },
};

pub struct GetBidsInput {
    pub auction_id: AuctionId,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(auction_id = %input.auction_id))]
    pub async fn get_bids(&self, input: GetBidsInput) -> Result<Vec<entities::Bid>, RestError> {
        let auction_id = input.auction_id.trim();
        if auction_id.is_empty() {
            return Err(RestError::BadParameters("auction id is required".to_string()));
        }
        self.repo.get_bids(&auction_id.to_string()).await
    }
}
