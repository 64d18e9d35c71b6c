use {
    crate::auction::entities::OrderId,
    uuid::Uuid,
};

pub type OrderRecordId = Uuid;

/// The part of a purchase order this service reads: its identity and the location of its item.
#[derive(Clone, Debug, PartialEq)]
pub struct Order {
    pub id:        OrderRecordId,
    pub order_id:  OrderId,
    pub item_guid: Uuid,
    pub item_uri:  String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OrderUriUpdateResult {
    pub guid:    Uuid,
    pub updated: u64,
}
