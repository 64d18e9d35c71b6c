use {
    super::entities,
    crate::kernel::db::Deadlines,
};

mod add_auction;
mod apply_transition;
mod get_auction;
mod get_auctions;
mod models;
mod replace_auction;

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
