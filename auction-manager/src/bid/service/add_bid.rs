use {
    super::Service,
    crate::{
        api::RestError,
        bid::entities,
    },
    time::OffsetDateTime,
};

pub struct AddBidInput {
    pub bid_create: entities::BidCreate,
}

impl Service {
    /// Stores a bid as submitted. The referenced auction is neither looked up nor required to be open.
    #[tracing::instrument(skip_all, err(level = tracing::Level::TRACE), fields(bid_id = %input.bid_create.id))]
    pub async fn add_bid(&self, input: AddBidInput) -> Result<entities::Bid, RestError> {
        let mut bid_create = input.bid_create;
        bid_create.id = bid_create.id.trim().to_string();
        if bid_create.id.is_empty() {
            return Err(RestError::BadParameters("bid id is required".to_string()));
        }

        let bid = self
            .repo
            .add_bid(bid_create.into_bid(OffsetDateTime::now_utc()))
            .await?;
        tracing::info!(bid_id = bid.id, auction_id = bid.auction_id, "Bid added");
        Ok(bid)
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            bid::repository::MockDatabase,
            kernel::db::Deadlines,
        },
        time::macros::datetime,
    };

    fn bid_create(id: &str) -> entities::BidCreate {
        entities::BidCreate {
            id:            id.to_string(),
            auction_id:    "a1".to_string(),
            price:         "10.50".to_string(),
            quantity:      4,
            delivery_date: None,
            submitter:     "bidder.onion".to_string(),
            response_date: None,
        }
    }

    #[tokio::test]
    async fn test_add_bid_stamps_response_date() {
        let mut db = MockDatabase::new();
        db.expect_add_bid()
            .withf(|bid| bid.id == "b1" && bid.price == "10.50")
            .times(1)
            .returning(|_| Ok(()));
        let service = Service::new(db, Deadlines::default());

        let before = OffsetDateTime::now_utc();
        let bid = service
            .add_bid(AddBidInput {
                bid_create: bid_create(" b1 "),
            })
            .await
            .unwrap();
        assert_eq!(bid.id, "b1");
        assert!(bid.response_date >= before);
    }

    #[tokio::test]
    async fn test_add_bid_keeps_submitted_response_date() {
        let mut db = MockDatabase::new();
        db.expect_add_bid().returning(|_| Ok(()));
        let service = Service::new(db, Deadlines::default());

        let mut create = bid_create("b1");
        create.response_date = Some(datetime!(2024-05-01 13:00 UTC));
        let bid = service
            .add_bid(AddBidInput { bid_create: create })
            .await
            .unwrap();
        assert_eq!(bid.response_date, datetime!(2024-05-01 13:00 UTC));
    }

    #[tokio::test]
    async fn test_add_bid_rejects_empty_id() {
        let mut db = MockDatabase::new();
        db.expect_add_bid().never();
        let service = Service::new(db, Deadlines::default());

        let result = service
            .add_bid(AddBidInput {
                bid_create: bid_create("  "),
            })
            .await;
        assert_eq!(
            result.unwrap_err(),
            RestError::BadParameters("bid id is required".to_string())
        );
    }

    #[tokio::test]
    async fn test_add_bid_surfaces_duplicate() {
        let mut db = MockDatabase::new();
        db.expect_add_bid()
            .returning(|_| Err(RestError::Conflict("Bid b1 already exists".to_string())));
        let service = Service::new(db, Deadlines::default());

        let result = service
            .add_bid(AddBidInput {
                bid_create: bid_create("b1"),
            })
            .await;
        assert!(matches!(result, Err(RestError::Conflict(_))));
    }
}
