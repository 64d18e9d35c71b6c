use {
    super::Service,
    crate::{
        api::RestError,
        auction::entities,
    },
    time::OffsetDateTime,
};

pub struct StartAuctionInput {
    pub auction_id: entities::AuctionId,
    pub start_time: OffsetDateTime,
}

impl Service {
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(auction_id = %input.auction_id))]
    pub async fn start_auction(
        &self,
        input: StartAuctionInput,
    ) -> Result<entities::Auction, RestError> {
        let auction = self.repo.get_auction(&input.auction_id).await?;
        if let Some(end_date) = auction.end_date {
            if input.start_time > end_date {
                return Err(RestError::BadParameters(format!(
                    "start time is later than the end date of auction {}",
                    auction.id
                )));
            }
        }
        self.transition(
            auction,
            entities::Transition::Start {
                start_time: input.start_time,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            auction::{
                repository::MockDatabase,
                service::tests::{
                    guarded,
                    last_write_wins,
                    stored_auction,
                },
            },
            bid::repository::MockDatabase as MockBidDatabase,
        },
        time::macros::datetime,
    };

    #[tokio::test]
    async fn test_start_auction_guarded() {
        let start_time = datetime!(2024-05-01 12:00 UTC);
        let mut db = MockDatabase::new();
        db.expect_get_auction()
            .returning(|_| Ok(stored_auction("a1", None, None, None)));
        db.expect_apply_transition()
            .withf(move |auction_id, transition| {
                auction_id == "a1" && *transition == entities::Transition::Start { start_time }
            })
            .times(1)
            .returning(|_, _| Ok(true));
        db.expect_replace_auction().never();
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), guarded());

        let auction = service
            .start_auction(StartAuctionInput {
                auction_id: "a1".to_string(),
                start_time,
            })
            .await
            .unwrap();
        assert_eq!(auction.start_date, Some(start_time));
    }

    #[tokio::test]
    async fn test_start_auction_not_found_writes_nothing() {
        let mut db = MockDatabase::new();
        db.expect_get_auction()
            .returning(|_| Err(RestError::AuctionNotFound));
        db.expect_apply_transition().never();
        db.expect_replace_auction().never();
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), guarded());

        let result = service
            .start_auction(StartAuctionInput {
                auction_id: "missing".to_string(),
                start_time: datetime!(2024-05-01 12:00 UTC),
            })
            .await;
        assert_eq!(result.unwrap_err(), RestError::AuctionNotFound);
    }

    #[tokio::test]
    async fn test_start_auction_twice_is_conflict_when_guarded() {
        let mut db = MockDatabase::new();
        db.expect_get_auction().returning(|_| {
            Ok(stored_auction(
                "a1",
                Some(datetime!(2024-05-01 12:00 UTC)),
                None,
                None,
            ))
        });
        db.expect_apply_transition().never();
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), guarded());

        let result = service
            .start_auction(StartAuctionInput {
                auction_id: "a1".to_string(),
                start_time: datetime!(2024-05-01 13:00 UTC),
            })
            .await;
        assert!(matches!(result, Err(RestError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_start_auction_lost_race_is_conflict() {
        let mut db = MockDatabase::new();
        db.expect_get_auction()
            .returning(|_| Ok(stored_auction("a1", None, None, None)));
        db.expect_apply_transition().returning(|_, _| Ok(false));
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), guarded());

        let result = service
            .start_auction(StartAuctionInput {
                auction_id: "a1".to_string(),
                start_time: datetime!(2024-05-01 12:00 UTC),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RestError::Conflict("Auction a1 was modified concurrently".to_string())
        );
    }

    #[tokio::test]
    async fn test_start_auction_last_write_wins_overwrites() {
        let restart = datetime!(2024-05-01 13:00 UTC);
        let mut db = MockDatabase::new();
        db.expect_get_auction().returning(|_| {
            Ok(stored_auction(
                "a1",
                Some(datetime!(2024-05-01 12:00 UTC)),
                None,
                None,
            ))
        });
        db.expect_apply_transition().never();
        db.expect_replace_auction()
            .withf(move |auction| auction.id == "a1" && auction.start_date == Some(restart))
            .times(1)
            .returning(|_| Ok(()));
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), last_write_wins());

        let auction = service
            .start_auction(StartAuctionInput {
                auction_id: "a1".to_string(),
                start_time: restart,
            })
            .await
            .unwrap();
        assert_eq!(auction.start_date, Some(restart));
    }

    #[tokio::test]
    async fn test_start_auction_after_end_date_is_rejected() {
        let mut db = MockDatabase::new();
        db.expect_get_auction().returning(|_| {
            Ok(stored_auction(
                "a1",
                None,
                Some(datetime!(2024-05-01 12:00 UTC)),
                None,
            ))
        });
        let service = Service::new_with_mocks(db, MockBidDatabase::new(), last_write_wins());

        let result = service
            .start_auction(StartAuctionInput {
                auction_id: "a1".to_string(),
                start_time: datetime!(2024-05-02 12:00 UTC),
            })
            .await;
        assert!(matches!(result, Err(RestError::BadParameters(_))));
    }
}
