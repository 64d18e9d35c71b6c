use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities::{
            self,
            AuctionState,
        },
    },
};

pub struct CreateAuctionInput {
    pub auction: entities::Auction,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(auction_id = %input.auction.id))]
    pub async fn create_auction(
        &self,
        input: CreateAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let mut auction = input.auction;
        auction.id = auction.id.trim().to_string();
        if auction.id.is_empty() {
            return Err(RestError::BadParameters("auction id is required".to_string()));
        }
        if auction.state() != AuctionState::Unstarted {
            return Err(RestError::BadParameters(
                "a new auction must not carry a start date, an end date or a winning bid"
                    .to_string(),
            ));
        }

        let auction = self.repo.add_auction(auction).await?;
        tracing::info!(
            auction_id = auction.id,
            order_id = auction.order_id,
            "Auction created"
        );
        Ok(auction)
    }
}
