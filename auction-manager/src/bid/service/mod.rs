use {
    super::repository::{
        Database,
        Repository,
    },
    crate::kernel::db::Deadlines,
    std::{
        ops::Deref,
        sync::Arc,
    },
};

pub mod add_bid;
pub mod get_bid;
pub mod get_bids;

pub struct ServiceInner {
    repo: Arc<Repository>,
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
    pub fn new(db: impl Database, deadlines: Deadlines) -> Self {
        Self(Arc::new(ServiceInner {
            repo: Arc::new(Repository::new(db, deadlines)),
        }))
    }
}
