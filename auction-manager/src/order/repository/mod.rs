use {
    super::entities,
    crate::kernel::db::Deadlines,
};

mod count_orders_by_item_guid;
mod get_order_by_item_guid;
mod models;
mod update_order_item_uri;

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
