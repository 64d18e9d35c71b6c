use {
    crate::{
        server::start_server,
        server_metrics::{
            is_metrics,
            MetricsLayer,
        },
    },
    anyhow::Result,
    clap::Parser,
    std::io::IsTerminal,
    tracing_subscriber::{
        filter::{
            self,
            LevelFilter,
        },
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
        Layer,
    },
};

mod api;
mod auction;
mod bid;
mod config;
mod kernel;
mod order;
mod server;
mod server_metrics;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_ansi(std::io::stderr().is_terminal());

    // Use the compact formatter if we're in a terminal, otherwise use the JSON formatter.
    let fmt_layer = if std::io::stderr().is_terminal() {
        fmt_layer.compact().boxed()
    } else {
        fmt_layer.json().boxed()
    };

    tracing_subscriber::registry()
        .with(MetricsLayer.with_filter(filter::filter_fn(|metadata| is_metrics(metadata, true))))
        .with(
            fmt_layer
                .with_filter(
                    EnvFilter::builder()
                        .with_default_directive(LevelFilter::INFO.into())
                        .from_env_lossy(),
                )
                .with_filter(filter::filter_fn(|metadata| !is_metrics(metadata, false))),
        )
        .try_init()?;

    // Parse the command line arguments with clap, will exit automatically on `--help` or
    // with invalid arguments.
    match config::Options::parse() {
        config::Options::Run(opts) => start_server(opts).await,
    }
}
