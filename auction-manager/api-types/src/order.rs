use {
    crate::{
        Routable,
        RouteProperties,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    strum::AsRefStr,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

/// Links the cloned copy of an order item to its new location.
#[derive(Serialize, Deserialize, ToSchema, Clone, PartialEq, Debug)]
pub struct OrderUriUpdate {
    /// The GUID of the order item, as a UUID.
    #[schema(example = "0b6a3f7e-4c52-4b8e-9b1a-3c1c2f5d8e01")]
    pub guid:   String,
    /// The new location of the order item.
    #[schema(example = "https://objects.example.com/items/0b6a3f7e")]
    pub uri:    String,
    #[serde(default)]
    #[schema(example = "acme")]
    pub entity: String,
}

#[derive(Serialize, Deserialize, ToSchema, ToResponse, Clone, PartialEq, Debug)]
#[response(description = "The number of orders whose item location changed")]
pub struct OrderUriUpdateResult {
    #[schema(example = "0b6a3f7e-4c52-4b8e-9b1a-3c1c2f5d8e01")]
    pub guid:    String,
    #[schema(example = 1)]
    pub updated: u64,
}

#[derive(AsRefStr, Clone)]
#[strum(prefix = "/")]
pub enum Route {
    #[strum(serialize = "updateOrderUri")]
    UpdateOrderUri,
}

impl Routable for Route {
    fn properties(&self) -> RouteProperties {
        RouteProperties {
            method:    http::Method::PUT,
            full_path: self.as_ref().to_string(),
        }
    }
}
