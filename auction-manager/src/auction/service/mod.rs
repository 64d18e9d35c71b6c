use {
    super::{
        entities::{
            self,
            TransitionPolicy,
        },
        repository::{
            Database,
            Repository,
        },
    },
    crate::{
        api::RestError,
        bid::service::Service as BidService,
        config::LifecycleConfig,
        kernel::db::Deadlines,
        server_metrics::AUCTION_TRANSITIONS_TOTAL,
    },
    axum_prometheus::metrics,
    std::{
        ops::Deref,
        sync::Arc,
    },
};

pub mod create_auction;
pub mod get_awaiting_winner_list;
pub mod get_start_list;
pub mod get_stop_list;
pub mod set_auction_winner;
pub mod start_auction;
pub mod stop_auction;

#[cfg(test)]
mod lifecycle_tests;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub transition_policy:            TransitionPolicy,
    pub stop_list_includes_unstarted: bool,
    pub verify_winning_bid:           bool,
}

impl From<LifecycleConfig> for Config {
    fn from(config: LifecycleConfig) -> Self {
        Self {
            transition_policy:            config.transition_policy,
            stop_list_includes_unstarted: config.stop_list_includes_unstarted,
            verify_winning_bid:           config.verify_winning_bid,
        }
    }
}

pub struct ServiceInner {
    config:      Config,
    repo:        Arc<Repository>,
    bid_service: BidService,
}

#[derive(Clone)]
pub struct Service(Arc<ServiceInner>);

impl Deref for Service {
    type Target = ServiceInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Service {
    pub fn new(
        db: impl Database,
        deadlines: Deadlines,
        config: Config,
        bid_service: BidService,
    ) -> Self {
        Self(Arc::new(ServiceInner {
            config,
            repo: Arc::new(Repository::new(db, deadlines)),
            bid_service,
        }))
    }

    /// Moves a validated auction through `transition` according to the configured policy.
    async fn transition(
        &self,
        mut auction: entities::Auction,
        transition: entities::Transition,
    ) -> Result<entities::Auction, RestError> {
        match self.config.transition_policy {
            TransitionPolicy::Guarded => {
                if !transition.is_applicable(&auction) {
                    return Err(RestError::Conflict(format!(
                        "Auction {} is {} and cannot take the {} transition",
                        auction.id,
                        auction.state(),
                        transition.name()
                    )));
                }
                if !self.repo.apply_transition(&auction.id, &transition).await? {
                    tracing::warn!(
                        auction_id = auction.id,
                        transition = transition.name(),
                        "Auction changed concurrently, transition not applied"
                    );
                    return Err(RestError::Conflict(format!(
                        "Auction {} was modified concurrently",
                        auction.id
                    )));
                }
                transition.apply(&mut auction);
            }
            TransitionPolicy::LastWriteWins => {
                transition.apply(&mut auction);
                self.repo.replace_auction(&auction).await?;
            }
        }

        metrics::counter!(AUCTION_TRANSITIONS_TOTAL, "transition" => transition.name())
            .increment(1);
        tracing::info!(
            auction_id = auction.id,
            transition = transition.name(),
            state = %auction.state(),
            "Auction transitioned"
        );
        Ok(auction)
    }
}
