use {
    crate::{
        api::RestError,
        auction::{
            self,
            entities as auction_entities,
            repository::{
                self as auction_repository,
                Database as AuctionDatabase,
            },
        },
        bid::{
            self,
            entities as bid_entities,
            repository::{
                self as bid_repository,
                Database as BidDatabase,
            },
        },
        order::{
            self,
            entities as order_entities,
            repository::{
                self as order_repository,
                Database as OrderDatabase,
            },
        },
        config::LifecycleConfig,
        kernel::db::Deadlines,
        state::Store,
    },
    axum::async_trait,
    axum_prometheus::metrics_exporter_prometheus::PrometheusBuilder,
    std::{
        sync::{
            Arc,
            Mutex,
        },
        time::Duration,
    },
    uuid::Uuid,
};

/// Storage gateway backed by process memory.
///
/// Clones share the same records, so one instance can back every service of a test.
/// Every call yields to the scheduler before touching the records, which lets concurrent
/// callers interleave between their reads and writes.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDb {
    auctions: Arc<Mutex<Vec<auction_repository::Auction>>>,
    bids:     Arc<Mutex<Vec<bid_repository::Bid>>>,
    orders:   Arc<Mutex<Vec<order_repository::Order>>>,
    latency:  Option<Duration>,
}

impl InMemoryDb {
    /// Every call sleeps for `latency` before it completes.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    pub fn insert_auction(&self, auction: auction_repository::Auction) {
        self.auctions.lock().unwrap().push(auction);
    }

    pub fn insert_order(&self, order: order_repository::Order) {
        self.orders.lock().unwrap().push(order);
    }

    pub fn auction(&self, auction_id: &str) -> Option<auction_entities::Auction> {
        self.auctions
            .lock()
            .unwrap()
            .iter()
            .find(|auction| auction.id == auction_id)
            .cloned()
            .map(auction_entities::Auction::from)
    }

    pub fn order(&self, id: Uuid) -> Option<order_repository::Order> {
        self.orders
            .lock()
            .unwrap()
            .iter()
            .find(|order| order.id == id)
            .cloned()
    }

    async fn delay(&self) {
        match self.latency {
            Some(latency) => tokio::time::sleep(latency).await,
            None => tokio::task::yield_now().await,
        }
    }
}

/// Services with default settings over `db`, as the REST handlers see them.
pub fn test_store(db: &InMemoryDb) -> Arc<Store> {
    let bid_service = bid::service::Service::new(db.clone(), Deadlines::default());
    let auction_service = auction::service::Service::new(
        db.clone(),
        Deadlines::default(),
        LifecycleConfig::default().into(),
        bid_service.clone(),
    );
    Arc::new(Store {
        auction_service,
        bid_service,
        order_service: order::service::Service::new(db.clone(), Deadlines::default()),
        metrics_recorder: PrometheusBuilder::new().build_recorder().handle(),
    })
}

#[async_trait]
impl AuctionDatabase for InMemoryDb {
    async fn add_auction(&self, auction: &auction_repository::Auction) -> Result<(), RestError> {
        self.delay().await;
        let mut auctions = self.auctions.lock().unwrap();
        if auctions.iter().any(|stored| stored.id == auction.id) {
            return Err(RestError::Conflict(format!(
                "Auction {} already exists",
                auction.id
            )));
        }
        auctions.push(auction.clone());
        Ok(())
    }

    async fn get_auction(
        &self,
        auction_id: &auction_entities::AuctionId,
    ) -> Result<auction_repository::Auction, RestError> {
        self.delay().await;
        let auctions = self.auctions.lock().unwrap();
        let mut matches = auctions.iter().filter(|auction| &auction.id == auction_id);
        match (matches.next(), matches.next()) {
            (None, _) => Err(RestError::AuctionNotFound),
            (Some(auction), None) => Ok(auction.clone()),
            (Some(_), Some(_)) => Err(RestError::Conflict(format!(
                "More than one auction with id {}",
                auction_id
            ))),
        }
    }

    async fn get_auctions(
        &self,
        selection: &auction_entities::AuctionSelection,
    ) -> Result<Vec<auction_repository::Auction>, RestError> {
        self.delay().await;
        Ok(self
            .auctions
            .lock()
            .unwrap()
            .iter()
            .filter(|auction| selection.matches(&auction_entities::Auction::from((*auction).clone())))
            .cloned()
            .collect())
    }

    async fn replace_auction(
        &self,
        auction: &auction_repository::Auction,
    ) -> Result<(), RestError> {
        self.delay().await;
        let mut auctions = self.auctions.lock().unwrap();
        match auctions.iter_mut().find(|stored| stored.id == auction.id) {
            Some(stored) => {
                *stored = auction.clone();
                Ok(())
            }
            None => Err(RestError::AuctionNotFound),
        }
    }

    async fn apply_transition(
        &self,
        auction_id: &auction_entities::AuctionId,
        transition: &auction_entities::Transition,
    ) -> Result<bool, RestError> {
        self.delay().await;
        let mut auctions = self.auctions.lock().unwrap();
        let Some(stored) = auctions.iter_mut().find(|stored| &stored.id == auction_id) else {
            return Ok(false);
        };
        let mut auction = auction_entities::Auction::from(stored.clone());
        if !transition.is_applicable(&auction) {
            return Ok(false);
        }
        transition.apply(&mut auction);
        *stored = auction_repository::Auction::from(&auction);
        Ok(true)
    }
}

#[async_trait]
impl BidDatabase for InMemoryDb {
    async fn add_bid(&self, bid: &bid_repository::Bid) -> Result<(), RestError> {
        self.delay().await;
        let mut bids = self.bids.lock().unwrap();
        if bids.iter().any(|stored| stored.id == bid.id) {
            return Err(RestError::Conflict(format!("Bid {} already exists", bid.id)));
        }
        bids.push(bid.clone());
        Ok(())
    }

    async fn get_bid(
        &self,
        bid_id: &bid_entities::BidId,
    ) -> Result<bid_repository::Bid, RestError> {
        self.delay().await;
        self.bids
            .lock()
            .unwrap()
            .iter()
            .find(|bid| &bid.id == bid_id)
            .cloned()
            .ok_or(RestError::BidNotFound)
    }

    async fn get_bids(
        &self,
        auction_id: &auction_entities::AuctionId,
    ) -> Result<Vec<bid_repository::Bid>, RestError> {
        self.delay().await;
        Ok(self
            .bids
            .lock()
            .unwrap()
            .iter()
            .filter(|bid| &bid.auction_id == auction_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderDatabase for InMemoryDb {
    async fn count_orders_by_item_guid(&self, guid: Uuid) -> Result<i64, RestError> {
        self.delay().await;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|order| order.item_guid == guid)
            .count() as i64)
    }

    async fn get_order_by_item_guid(
        &self,
        guid: Uuid,
    ) -> Result<Option<order_repository::Order>, RestError> {
        self.delay().await;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .find(|order| order.item_guid == guid)
            .cloned())
    }

    async fn update_order_item_uri(
        &self,
        id: order_entities::OrderRecordId,
        uri: &str,
    ) -> Result<u64, RestError> {
        self.delay().await;
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|order| order.id == id) {
            Some(order) if order.item_uri != uri => {
                order.item_uri = uri.to_string();
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}
