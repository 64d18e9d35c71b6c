//! Metrics Server
//!
//! Storage calls run inside `metrics`-target spans opened by [`crate::kernel::db::with_deadline`].
//! [`MetricsLayer`] turns every such span into a duration histogram and a result counter when it
//! closes, and [`start_metrics`] serves everything recorded over /metrics.
use {
    crate::{
        config::RunOptions,
        server::{
            EXIT_CHECK_INTERVAL,
            SHOULD_EXIT,
        },
        state::Store,
    },
    anyhow::Result,
    axum::{
        routing::get,
        Router,
    },
    axum_prometheus::{
        metrics,
        metrics_exporter_prometheus::{
            Matcher,
            PrometheusBuilder,
        },
    },
    std::{
        fmt::Debug,
        sync::{
            atomic::Ordering,
            Arc,
        },
        time::Instant,
    },
    tracing::{
        field::{
            Field,
            Visit,
        },
        span::{
            Attributes,
            Record,
        },
        Id,
        Metadata,
        Subscriber,
    },
    tracing_subscriber::{
        layer::Context,
        registry::LookupSpan,
        Layer,
    },
};

pub const AUCTION_TRANSITIONS_TOTAL: &str = "auction_transitions_total";

/// Histogram buckets in seconds. The upper end covers the default read (5s) and write (10s) deadlines.
const DURATION_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 7.5, 10.0,
];

pub fn recorder_builder() -> Result<PrometheusBuilder> {
    Ok(PrometheusBuilder::new().set_buckets_for_metric(
        Matcher::Suffix("_duration_seconds".to_string()),
        DURATION_BUCKETS,
    )?)
}

/// Whether the span or event is meant for the metrics layer.
///
/// With `check_tracing_enabled` only metadata that also carries a `tracing_enabled` field qualifies.
pub fn is_metrics(metadata: &Metadata, check_tracing_enabled: bool) -> bool {
    metadata.target().starts_with("metrics")
        && (!check_tracing_enabled
            || metadata
                .fields()
                .iter()
                .any(|field| field.name() == "tracing_enabled"))
}

/// What a metrics span reports once it closes.
#[derive(Debug)]
struct SpanMetrics {
    category:   String,
    name:       String,
    result:     String,
    started_at: Instant,
}

impl SpanMetrics {
    fn new(metadata: &Metadata) -> Self {
        Self {
            category:   "unknown".to_string(),
            name:       metadata.name().to_string(),
            result:     "unknown".to_string(),
            started_at: Instant::now(),
        }
    }

    fn emit(&self) {
        let labels = [("name", self.name.clone()), ("result", self.result.clone())];
        metrics::histogram!(format!("{}_duration_seconds", self.category), &labels)
            .record(self.started_at.elapsed().as_secs_f64());
        metrics::counter!(format!("{}_total", self.category), &labels).increment(1);
    }
}

impl Visit for SpanMetrics {
    fn record_str(&mut self, field: &Field, value: &str) {
        let slot = match field.name() {
            "category" => &mut self.category,
            "name" => &mut self.name,
            "result" => &mut self.result,
            _ => return,
        };
        *slot = value.to_string();
    }

    fn record_debug(&mut self, _field: &Field, _value: &dyn Debug) {}
}

pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
{
    fn on_new_span(&self, attrs: &Attributes<'_>, id: &Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        let mut data = SpanMetrics::new(span.metadata());
        attrs.record(&mut data);
        span.extensions_mut().insert(data);
    }

    fn on_record(&self, id: &Id, values: &Record<'_>, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(id) else {
            return;
        };
        if let Some(data) = span.extensions_mut().get_mut::<SpanMetrics>() {
            values.record(data);
        };
    }

    fn on_close(&self, id: Id, ctx: Context<'_, S>) {
        let Some(span) = ctx.span(&id) else {
            return;
        };
        let data = span.extensions_mut().remove::<SpanMetrics>();
        match data {
            Some(data) => data.emit(),
            None => tracing::warn!(span = span.metadata().name(), "Metrics span closed without data"),
        }
    }
}

pub async fn start_metrics(run_options: RunOptions, store: Arc<Store>) -> Result<()> {
    tracing::info!(address = %run_options.server.metrics_addr, "Starting Metrics Server...");

    let metrics_recorder = store.metrics_recorder.clone();
    let app = Router::new().route(
        "/metrics",
        get(|| async move { metrics_recorder.render() }),
    );

    let listener = tokio::net::TcpListener::bind(&run_options.server.metrics_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            while !SHOULD_EXIT.load(Ordering::Acquire) {
                tokio::time::sleep(EXIT_CHECK_INTERVAL).await;
            }
            tracing::info!("Shutting down metrics server...");
        })
        .await?;
    Ok(())
}
