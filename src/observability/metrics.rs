use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use tracing::info;
use std::sync::Arc;
use tokio::sync::OnceCell;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

/// Counters for the token lifecycle and the API call surface. The
/// registry is public so the host process can expose it; this crate
/// does not serve an exporter endpoint itself.
#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token exchange metrics
    pub token_exchange_requests: IntCounter,
    pub token_exchange_failures: IntCounterVec,

    // Cache metrics
    pub token_cache_hits: IntCounter,
    pub token_cache_misses: IntCounter,
    pub token_invalidations: IntCounter,
    pub cached_tokens: IntGauge,

    // API call metrics
    pub api_requests: IntCounterVec,
    pub api_failures: IntCounterVec,
    pub api_request_duration: HistogramVec,

    // Config/runtime
    pub config_validation_errors: IntCounter,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("wecom".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            // Token exchange
            token_exchange_requests: IntCounter::new("token_exchange_requests_total", "Total credential exchange attempts").unwrap(),
            token_exchange_failures: IntCounterVec::new(Opts::new("token_exchange_failures_total", "Credential exchange failures by reason"), &["reason"]).unwrap(),

            // Cache
            token_cache_hits: IntCounter::new("token_cache_hits_total", "Token requests served from cache").unwrap(),
            token_cache_misses: IntCounter::new("token_cache_misses_total", "Token requests that required an exchange").unwrap(),
            token_invalidations: IntCounter::new("token_invalidations_total", "Cached tokens dropped after auth failures").unwrap(),
            cached_tokens: IntGauge::new("cached_tokens_total", "Tokens currently cached").unwrap(),

            // API calls
            api_requests: IntCounterVec::new(Opts::new("api_requests_total", "API calls by path and method"), &["path", "method"]).unwrap(),
            api_failures: IntCounterVec::new(Opts::new("api_failures_total", "API call failures by path and kind"), &["path", "kind"]).unwrap(),
            api_request_duration: HistogramVec::new(HistogramOpts::new("api_request_duration_seconds", "API call duration seconds").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["path"]).unwrap(),

            // Config/runtime
            config_validation_errors: IntCounter::new("config_validation_errors_total", "Validation errors during startup").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_exchange_requests.clone())).unwrap();
        reg.register(Box::new(metrics.token_exchange_failures.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.token_cache_misses.clone())).unwrap();
        reg.register(Box::new(metrics.token_invalidations.clone())).unwrap();
        reg.register(Box::new(metrics.cached_tokens.clone())).unwrap();
        reg.register(Box::new(metrics.api_requests.clone())).unwrap();
        reg.register(Box::new(metrics.api_failures.clone())).unwrap();
        reg.register(Box::new(metrics.api_request_duration.clone())).unwrap();
        reg.register(Box::new(metrics.config_validation_errors.clone())).unwrap();

        metrics
    }
}
