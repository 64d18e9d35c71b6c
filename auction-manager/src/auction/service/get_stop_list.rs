use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
    time::{
        Duration,
        OffsetDateTime,
    },
};

pub struct GetStopListInput {
    /// Minimum time in seconds the auction must have been open, as received.
    pub duration: String,
}

impl GetStopListInput {
    fn parse_duration(&self) -> Result<Duration, RestError> {
        let seconds: i64 = self.duration.trim().parse().map_err(|_| {
            RestError::BadParameters("duration must be a valid integer".to_string())
        })?;
        if seconds <= 0 {
            return Err(RestError::BadParameters(
                "duration must be positive".to_string(),
            ));
        }
        Ok(Duration::seconds(seconds))
    }
}

impl Service {
    /// Open auctions that started at least `duration` seconds ago.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(duration = %input.duration))]
    pub async fn get_stop_list(
        &self,
        input: GetStopListInput,
    ) -> Result<Vec<entities::Auction>, RestError> {
        let duration = input.parse_duration()?;
        let threshold = OffsetDateTime::now_utc()
            .checked_sub(duration)
            .ok_or_else(|| RestError::BadParameters("duration is out of range".to_string()))?;
        self.repo
            .get_auctions(entities::AuctionSelection::StopCandidates {
                threshold,
                include_unstarted: self.config.stop_list_includes_unstarted,
            })
            .await
    }
}
