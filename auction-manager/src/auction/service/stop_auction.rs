use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
    time::OffsetDateTime,
};

pub struct StopAuctionInput {
    pub auction_id: entities::AuctionId,
    pub end_time:   OffsetDateTime,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(auction_id = %input.auction_id))]
    pub async fn stop_auction(
        &self,
        input: StopAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = self.repo.get_auction(&input.auction_id).await?;
        let start_date = auction.start_date.ok_or_else(|| {
            RestError::BadParameters(format!("auction {} has not been started", auction.id))
        })?;
        if input.end_time < start_date {
            return Err(RestError::BadParameters(format!(
                "end time is earlier than the start date of auction {}",
                auction.id
            )));
        }
        self.transition(
            auction,
            entities::Transition::Stop {
                end_time: input.end_time,
            },
        )
        .await
    }
}
