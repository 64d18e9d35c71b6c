use {
    crate::{
        api,
        auction,
        bid,
        config::{
            Config,
            RunOptions,
        },
        order,
        server_metrics,
        state::Store,
    },
    anyhow::anyhow,
    futures::future::join_all,
    sqlx::postgres::PgPoolOptions,
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = ?err, "Failed to listen for the shutdown signal");
        }
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    let config = Config::load(&run_options.config.config).map_err(|err| {
        anyhow!(
            "Failed to load config from file({path}): {:?}",
            err,
            path = run_options.config.config
        )
    })?;
    tracing::info!(config = ?config, "Loaded config");

    let pool = PgPoolOptions::new()
        .max_connections(run_options.server.database_max_connections)
        .acquire_timeout(config.deadlines.write)
        .connect(&run_options.server.database_url)
        .await
        .map_err(|err| anyhow!("Failed to connect to database: {:?}", err))?;

    let metrics_recorder = server_metrics::recorder_builder()?
        .install_recorder()
        .map_err(|err| anyhow!("Failed to install the metrics recorder: {:?}", err))?;

    let bid_service = bid::service::Service::new(pool.clone(), config.deadlines);
    let auction_service = auction::service::Service::new(
        pool.clone(),
        config.deadlines,
        config.lifecycle.clone().into(),
        bid_service.clone(),
    );
    let order_service = order::service::Service::new(pool, config.deadlines);

    let store = Arc::new(Store {
        auction_service,
        bid_service,
        order_service,
        metrics_recorder,
    });

    let server_loop = tokio::spawn(api::start_api(run_options.clone(), store.clone()));
    let metrics_loop = tokio::spawn(server_metrics::start_metrics(run_options, store.clone()));
    for result in join_all(vec![server_loop, metrics_loop]).await {
        match result {
            Ok(Ok(())) => {}
            Ok(Err(err)) => tracing::error!(error = ?err, "Server loop failed"),
            Err(err) => tracing::error!(error = ?err, "Server task panicked"),
        }
    }
    Ok(())
}

// Set once the shutdown signal is received. The API and metrics listeners poll it to drain.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
