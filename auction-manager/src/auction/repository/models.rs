#[cfg(test)]
use mockall::automock;
use {
    super::entities,
    crate::{
        api::RestError,
        kernel::db::{
            query_error,
            DB,
        },
    },
    axum::async_trait,
    sqlx::{
        FromRow,
        Postgres,
        QueryBuilder,
    },
    std::fmt::Debug,
    time::OffsetDateTime,
};

const AUCTION_COLUMNS: &str =
    "SELECT id, order_id, start_date, end_date, winning_bid, subscribed, cloned FROM auction";

#[derive(Clone, Debug, PartialEq, FromRow)]
pub struct Auction {
    pub id:          String,
    pub order_id:    String,
    pub start_date:  Option<OffsetDateTime>,
    pub end_date:    Option<OffsetDateTime>,
    pub winning_bid: Option<String>,
    pub subscribed:  bool,
    pub cloned:      bool,
}

impl From<Auction> for entities::Auction {
    fn from(auction: Auction) -> Self {
        Self {
            id:          auction.id,
            order_id:    auction.order_id,
            start_date:  auction.start_date,
            end_date:    auction.end_date,
            winning_bid: auction.winning_bid.filter(|bid_id| !bid_id.is_empty()),
            subscribed:  auction.subscribed,
            cloned:      auction.cloned,
        }
    }
}

impl From<&entities::Auction> for Auction {
    fn from(auction: &entities::Auction) -> Self {
        Self {
            id:          auction.id.clone(),
            order_id:    auction.order_id.clone(),
            start_date:  auction.start_date,
            end_date:    auction.end_date,
            winning_bid: auction.winning_bid.clone(),
            subscribed:  auction.subscribed,
            cloned:      auction.cloned,
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Database: Debug + Send + Sync + 'static {
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError>;
    /// Fails with a conflict when more than one record carries the id.
    async fn get_auction(&self, auction_id: &entities::AuctionId) -> Result<Auction, RestError>;
    async fn get_auctions(
        &self,
        selection: &entities::AuctionSelection,
    ) -> Result<Vec<Auction>, RestError>;
    async fn replace_auction(&self, auction: &Auction) -> Result<(), RestError>;
    /// Applies the transition only if the stored auction is still in the state it leaves from.
    ///
    /// Returns whether the stored auction changed.
    async fn apply_transition(
        &self,
        auction_id: &entities::AuctionId,
        transition: &entities::Transition,
    ) -> Result<bool, RestError>;
}

#[async_trait]
impl Database for DB {
    async fn add_auction(&self, auction: &Auction) -> Result<(), RestError> {
        sqlx::query("INSERT INTO auction (id, order_id, start_date, end_date, winning_bid, subscribed, cloned) VALUES ($1, $2, $3, $4, $5, $6, $7)")
            .bind(&auction.id)
            .bind(&auction.order_id)
            .bind(auction.start_date)
            .bind(auction.end_date)
            .bind(&auction.winning_bid)
            .bind(auction.subscribed)
            .bind(auction.cloned)
            .execute(self)
            .await
            .map_err(|e| {
                query_error(e, || format!("Auction {} already exists", auction.id))
            })?;
        Ok(())
    }

    async fn get_auction(&self, auction_id: &entities::AuctionId) -> Result<Auction, RestError> {
        let mut auctions: Vec<Auction> =
            sqlx::query_as(&format!("{} WHERE id = $1 LIMIT 2", AUCTION_COLUMNS))
                .bind(auction_id)
                .fetch_all(self)
                .await
                .map_err(|e| query_error(e, String::new))?;
        match auctions.len() {
            0 => Err(RestError::AuctionNotFound),
            1 => Ok(auctions.remove(0)),
            _ => {
                tracing::error!(auction_id = %auction_id, "DB: Auction id is not unique");
                Err(RestError::Conflict(format!(
                    "More than one auction with id {}",
                    auction_id
                )))
            }
        }
    }

    async fn get_auctions(
        &self,
        selection: &entities::AuctionSelection,
    ) -> Result<Vec<Auction>, RestError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(AUCTION_COLUMNS);
        query.push(" WHERE ");
        match selection {
            entities::AuctionSelection::StartCandidates => {
                query.push("start_date IS NULL");
            }
            entities::AuctionSelection::StopCandidates {
                threshold,
                include_unstarted,
            } => {
                query
                    .push("end_date IS NULL AND (start_date <= ")
                    .push_bind(*threshold);
                if *include_unstarted {
                    query.push(" OR start_date IS NULL");
                }
                query.push(")");
            }
            entities::AuctionSelection::AwaitingWinner => {
                query.push("end_date IS NOT NULL AND COALESCE(winning_bid, '') = ''");
            }
        }
        query.push(" ORDER BY creation_time, id");
        query
            .build_query_as::<Auction>()
            .fetch_all(self)
            .await
            .map_err(|e| query_error(e, String::new))
    }

    async fn replace_auction(&self, auction: &Auction) -> Result<(), RestError> {
        let result = sqlx::query("UPDATE auction SET order_id = $2, start_date = $3, end_date = $4, winning_bid = $5, subscribed = $6, cloned = $7 WHERE id = $1")
            .bind(&auction.id)
            .bind(&auction.order_id)
            .bind(auction.start_date)
            .bind(auction.end_date)
            .bind(&auction.winning_bid)
            .bind(auction.subscribed)
            .bind(auction.cloned)
            .execute(self)
            .await
            .map_err(|e| query_error(e, String::new))?;
        if result.rows_affected() == 0 {
            return Err(RestError::AuctionNotFound);
        }
        Ok(())
    }

    async fn apply_transition(
        &self,
        auction_id: &entities::AuctionId,
        transition: &entities::Transition,
    ) -> Result<bool, RestError> {
        let query = match transition {
            entities::Transition::Start { start_time } => {
                sqlx::query("UPDATE auction SET start_date = $2 WHERE id = $1 AND start_date IS NULL")
                    .bind(auction_id)
                    .bind(*start_time)
            }
            entities::Transition::Stop { end_time } => {
                sqlx::query("UPDATE auction SET end_date = $2 WHERE id = $1 AND end_date IS NULL AND start_date IS NOT NULL AND start_date <= $2")
                    .bind(auction_id)
                    .bind(*end_time)
            }
            entities::Transition::AssignWinner { bid_id } => {
                sqlx::query("UPDATE auction SET winning_bid = $2 WHERE id = $1 AND end_date IS NOT NULL AND COALESCE(winning_bid, '') = ''")
                    .bind(auction_id)
                    .bind(bid_id)
            }
        };
        let result = query
            .execute(self)
            .await
            .map_err(|e| query_error(e, String::new))?;
        Ok(result.rows_affected() > 0)
    }
}
