use {
    super::entities,
    crate::kernel::db::Deadlines,
};

mod add_bid;
mod get_bid;
mod get_bids;
mod models;

pub use models::*;

#[derive(Debug)]
pub struct Repository {
    pub db:        Box<dyn Database>,
    pub deadlines: Deadlines,
}

impl Repository {
    pub fn new(db: impl Database, deadlines: Deadlines) -> Self {
        Self {
            db: Box::new(db),
            deadlines,
        }
    }
}
