use {
    crate::{
        auction,
        bid,
        order,
    },
    axum_prometheus::metrics_exporter_prometheus::PrometheusHandle,
};

pub struct Store {
    pub auction_service:  auction::service::Service,
    pub bid_service:      bid::service::Service,
    pub order_service:    order::service::Service,
    pub metrics_recorder: PrometheusHandle,
}
