use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
        bid::{
            entities::BidId,
            service::get_bid::GetBidInput,
        },
    },
};

pub struct SetAuctionWinnerInput {
    pub auction_id: entities::AuctionId,
    pub bid_id:     BidId,
}

impl Service {
    async fn verify_winning_bid(
        &self,
        auction: &entities::Auction,
        bid_id: &BidId,
    ) -> Result<(), RestError> {
        match self
            .bid_service
            .get_bid(GetBidInput {
                bid_id: bid_id.clone(),
            })
            .await
        {
            Ok(bid) if bid.auction_id == auction.id => Ok(()),
            Ok(bid) => Err(RestError::BadParameters(format!(
                "bid {} belongs to auction {}, not {}",
                bid_id, bid.auction_id, auction.id
            ))),
            Err(RestError::BidNotFound) => Err(RestError::BadParameters(format!(
                "bid {} does not exist",
                bid_id
            ))),
            Err(err) => Err(err),
        }
    }

    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(auction_id = %input.auction_id, bid_id = %input.bid_id))]
    pub async fn set_auction_winner(
        &self,
        input: SetAuctionWinnerInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = self.repo.get_auction(&input.auction_id).await?;
        if auction.end_date.is_none() {
            return Err(RestError::BadParameters(format!(
                "auction {} has not been stopped",
                auction.id
            )));
        }
        if self.config.verify_winning_bid {
            self.verify_winning_bid(&auction, &input.bid_id).await?;
        }
        self.transition(
            auction,
            entities::Transition::AssignWinner {
                bid_id: input.bid_id,
            },
        )
        .await
    }
}
