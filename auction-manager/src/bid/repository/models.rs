#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        auction::entities::AuctionId,
        kernel::db::{
            query_error,
            DB,
        },
    },
    axum::async_trait,
    sqlx::FromRow,
    std::fmt::Debug,
    time::OffsetDateTime,
};

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Bid {
    pub id:            String,
    pub auction_id:    String,
    pub price:         String,
    pub quantity:      i64,
    pub delivery_date: Option<OffsetDateTime>,
    pub submitter:     String,
    pub response_date: OffsetDateTime,
}

impl From<Bid> for entities::Bid {
    fn from(bid: Bid) -> Self {
        Self {
            id:            bid.id,
            auction_id:    bid.auction_id,
            price:         bid.price,
            quantity:      bid.quantity,
            delivery_date: bid.delivery_date,
            submitter:     bid.submitter,
            response_date: bid.response_date,
        }
    }
}

impl From<&entities::Bid> for Bid {
    fn from(bid: &entities::Bid) -> Self {
        Self {
            id:            bid.id.clone(),
            auction_id:    bid.auction_id.clone(),
            price:         bid.price.clone(),
            quantity:      bid.quantity,
            delivery_date: bid.delivery_date,
            submitter:     bid.submitter.clone(),
            response_date: bid.response_date,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_bid(&self, bid: &Bid) -> Result<(), RestError>;
    async fn get_bid(&self, bid_id: &entities::BidId) -> Result<Bid, RestError>;
    async fn get_bids(&self, auction_id: &AuctionId) -> Result<Vec<Bid>, RestError>;
}

#[async_trait]
impl Database for DB {
    async fn add_bid(&self, bid: &Bid) -> Result<(), RestError> {
        sqlx::query("INSERT INTO bid (id, auction_id, price, quantity, delivery_date, submitter, response_date) VALUES ($1, $2, $3, $4, $5, $6, $7)")
            .bind(&bid.id)
            .bind(&bid.auction_id)
            .bind(&bid.price)
            .bind(bid.quantity)
            .bind(bid.delivery_date)
            .bind(&bid.submitter)
            .bind(bid.response_date)
            .execute(self)
            .await
            .map_err(|e| query_error(e, || format!("Bid {} already exists", bid.id)))?;
        Ok(())
    }

    async fn get_bid(&self, bid_id: &entities::BidId) -> Result<Bid, RestError> {
        let mut bids: Vec<Bid> = sqlx::query_as("SELECT id, auction_id, price, quantity, delivery_date, submitter, response_date FROM bid WHERE id = $1 LIMIT 2")
            .bind(bid_id)
            .fetch_all(self)
            .await
            .map_err(|e| query_error(e, String::new))?;
        match bids.len() {
            0 => Err(RestError::BidNotFound),
            1 => Ok(bids.remove(0)),
            _ => {
                tracing::error!(bid_id = %bid_id, "DB: Bid id is not unique");
                Err(RestError::Conflict(format!(
                    "More than one bid with id {}",
                    bid_id
                )))
            }
        }
    }

    async fn get_bids(&self, auction_id: &AuctionId) -> Result<Vec<Bid>, RestError> {
        sqlx::query_as("SELECT id, auction_id, price, quantity, delivery_date, submitter, response_date FROM bid WHERE auction_id = $1 ORDER BY response_date, id")
            .bind(auction_id)
            .fetch_all(self)
            .await
            .map_err(|e| query_error(e, String::new))
    }
}
