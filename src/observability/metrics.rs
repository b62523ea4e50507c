//! Metrics collection and exposition.
//!
//! # Metrics
//! - `app_quotes_total` (counter): quotes calculated, by `number_of_items`
//! - `app_quote_amount_usd` (histogram): quoted shipping cost
//! - `app_recommendations_total` (counter): recommendation lists, by `products_excluded`
//! - `http_requests_total` (counter): API requests by method, route, status
//! - `http_request_duration_seconds` (histogram): API latency
//! - `process_*` (gauges): see `process.rs`
//!
//! # Design Decisions
//! - Handlers only talk to the `metrics` facade; the recorder is installed once at startup
//! - Health and scrape endpoints are not counted

use std::time::{Duration, Instant};

use metrics::Unit;
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

use crate::observability::process::ProcessCollector;

pub const QUOTES_TOTAL: &str = "app_quotes_total";
pub const QUOTE_AMOUNT: &str = "app_quote_amount_usd";
pub const RECOMMENDATIONS_TOTAL: &str = "app_recommendations_total";
pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";

const QUOTE_AMOUNT_BUCKETS: &[f64] = &[5.0, 7.5, 10.0, 15.0, 20.0, 30.0, 50.0, 100.0, 250.0];
const LATENCY_BUCKETS: &[f64] = &[
    0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0,
];

/// How often the upkeep task drains histograms and samples the process.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the Prometheus recorder as the global `metrics` recorder.
///
/// Returns the handle used to render `/metrics`.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(Matcher::Full(QUOTE_AMOUNT.to_string()), QUOTE_AMOUNT_BUCKETS)?
        .set_buckets_for_metric(
            Matcher::Full(HTTP_REQUEST_DURATION.to_string()),
            LATENCY_BUCKETS,
        )?
        .install_recorder()?;

    describe_metrics();
    Ok(handle)
}

/// Register descriptions and units with the installed recorder.
pub fn describe_metrics() {
    metrics::describe_counter!(QUOTES_TOTAL, Unit::Count, "Shipping quotes calculated");
    metrics::describe_histogram!(QUOTE_AMOUNT, "Quoted shipping cost in USD");
    metrics::describe_counter!(
        RECOMMENDATIONS_TOTAL,
        Unit::Count,
        "Recommendation lists generated"
    );
    metrics::describe_counter!(HTTP_REQUESTS_TOTAL, Unit::Count, "API requests served");
    metrics::describe_histogram!(
        HTTP_REQUEST_DURATION,
        Unit::Seconds,
        "API request latency"
    );
    ProcessCollector::describe();
}

/// Spawn the periodic upkeep task required by the Prometheus recorder.
///
/// Each tick also refreshes the process gauges when a collector is given.
pub fn spawn_upkeep(
    handle: PrometheusHandle,
    mut process: Option<ProcessCollector>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            if let Some(collector) = process.as_mut() {
                collector.collect();
            }
            handle.run_upkeep();
        }
    })
}

/// Record one calculated quote.
pub fn record_quote(items: u32, cost_usd: f64) {
    metrics::counter!(QUOTES_TOTAL, "number_of_items" => items.to_string()).increment(1);
    metrics::histogram!(QUOTE_AMOUNT).record(cost_usd);
}

/// Record one generated recommendation list.
pub fn record_recommendations(excluded: usize) {
    metrics::counter!(RECOMMENDATIONS_TOTAL, "products_excluded" => excluded.to_string())
        .increment(1);
}

/// Record a served API request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();

    metrics::counter!(
        HTTP_REQUESTS_TOTAL,
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(HTTP_REQUEST_DURATION, "method" => method, "route" => route)
        .record(start.elapsed().as_secs_f64());
}
