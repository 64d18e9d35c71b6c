use {
    crate::{
        auction,
        bid,
        config::RunOptions,
        order,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    auction_manager_api_types::{
        self as api_types,
        ErrorBodyResponse,
        Routable,
    },
    axum::{
        extract::{
            rejection::{
                JsonRejection,
                PathRejection,
            },
            FromRequest,
            FromRequestParts,
        },
        handler::Handler,
        http::{
            Method,
            StatusCode,
        },
        response::{
            IntoResponse,
            Response,
        },
        routing::{
            get,
            post,
            put,
        },
        Router,
    },
    axum_prometheus::PrometheusMetricLayerBuilder,
    clap::crate_version,
    serde::Serialize,
    std::{
        fmt::{
            Display,
            Formatter,
        },
        sync::{
            atomic::Ordering,
            Arc,
        },
    },
    tower_http::cors::CorsLayer,
    utoipa::OpenApi,
    utoipa_redoc::{
        Redoc,
        Servable,
    },
};

async fn root() -> String {
    format!("Auction Manager API {}", crate_version!())
}

#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// The request contained invalid parameters
    BadParameters(String),
    /// The auction was not found
    AuctionNotFound,
    /// The bid was not found
    BidNotFound,
    /// The request conflicts with the stored state
    Conflict(String),
    /// The storage backend failed to process the request
    StorageError,
    /// The storage backend did not respond within the configured deadline
    DeadlineExceeded,
}

impl RestError {
    pub fn to_status_and_message(&self) -> (StatusCode, String) {
        match self {
            RestError::BadParameters(msg) => {
                (StatusCode::BAD_REQUEST, format!("Bad parameters: {}", msg))
            }
            RestError::AuctionNotFound => (
                StatusCode::NOT_FOUND,
                "Auction with the specified id was not found".to_string(),
            ),
            RestError::BidNotFound => (
                StatusCode::NOT_FOUND,
                "Bid with the specified id was not found".to_string(),
            ),
            RestError::Conflict(msg) => (StatusCode::CONFLICT, format!("Conflict: {}", msg)),
            RestError::StorageError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The storage backend failed to process the request".to_string(),
            ),
            RestError::DeadlineExceeded => (
                StatusCode::GATEWAY_TIMEOUT,
                "The storage backend did not respond in time".to_string(),
            ),
        }
    }
}

impl Display for RestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_status_and_message().1)
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let (status, msg) = self.to_status_and_message();
        (status, axum::Json(ErrorBodyResponse { error: msg })).into_response()
    }
}

impl From<JsonRejection> for RestError {
    fn from(rejection: JsonRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

impl From<PathRejection> for RestError {
    fn from(rejection: PathRejection) -> Self {
        RestError::BadParameters(rejection.body_text())
    }
}

/// JSON body extractor and responder whose rejections are reported as [`RestError`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(RestError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path extractor whose rejections are reported as [`RestError`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(RestError))]
pub struct Path<T>(pub T);

pub async fn live() -> Response {
    (StatusCode::OK, "OK").into_response()
}

pub struct WrappedRouter {
    pub store:  Arc<Store>,
    pub router: Router<Arc<Store>>,
}

impl WrappedRouter {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            router: Router::new(),
        }
    }

    pub fn route<H, T>(self, path: impl Routable, handler: H) -> Self
    where
        H: Handler<T, Arc<Store>>,
        T: 'static,
    {
        let properties = path.properties();
        let method_router = if properties.method == Method::POST {
            post(handler)
        } else if properties.method == Method::PUT {
            put(handler)
        } else {
            get(handler)
        };
        Self {
            store:  self.store,
            router: self.router.route(&properties.full_path, method_router),
        }
    }
}

pub async fn start_api(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    // Make sure functions included in the paths section have distinct names, otherwise some api generators will fail
    #[derive(OpenApi)]
    #[openapi(
        paths(
            auction::api::post_create_auction,
            auction::api::get_start_list,
            auction::api::get_stop_list,
            auction::api::put_start_auction,
            auction::api::put_stop_auction,
            auction::api::get_awaiting_winner_list,
            auction::api::put_set_auction_winner,
            bid::api::post_add_bid,
            bid::api::get_bid_list,
            order::api::put_update_order_uri,
        ),
        components(
            schemas(
                api_types::auction::Auction,
                api_types::auction::Auctions,
                api_types::bid::Bid,
                api_types::bid::Bids,
                api_types::order::OrderUriUpdate,
                api_types::order::OrderUriUpdateResult,
                ErrorBodyResponse,
            ),
            responses(
                ErrorBodyResponse,
                api_types::auction::Auctions,
                api_types::bid::Bids,
                api_types::order::OrderUriUpdateResult,
            ),
        ),
        tags(
            (name = "Auction Manager", description = "Auction Manager runs sealed-bid auctions for purchase orders. \
            An external scheduler polls the candidate lists and drives each auction through start, stop and winner selection.")
        )
    )]
    struct ApiDoc;

    let (prometheus_layer, _) = PrometheusMetricLayerBuilder::new()
        .with_metrics_from_fn(|| store.metrics_recorder.clone())
        .build_pair();

    let openapi = ApiDoc::openapi();
    let app: Router<()> = Router::new()
        .merge(Redoc::with_url(
            api_types::Route::Docs.as_ref().to_string(),
            openapi.clone(),
        ))
        .merge(auction::api::get_routes(store.clone()))
        .merge(bid::api::get_routes(store.clone()))
        .merge(order::api::get_routes(store.clone()))
        .route(
            api_types::Route::OpenApi.as_ref(),
            get(move || {
                let openapi = openapi.clone();
                async move { axum::Json(openapi) }
            }),
        )
        .route(api_types::Route::Root.as_ref(), get(root))
        .route(api_types::Route::Liveness.as_ref(), get(live))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer)
        .with_state(store);

    let listener = tokio::net::TcpListener::bind(&run_options.server.listen_addr).await?;
    tracing::info!(address = %run_options.server.listen_addr, "Starting API server...");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down API server...");
        })
        .await?;
    Ok(())
}
