use std::sync::{Arc, OnceLock};

use prometheus::{CounterVec, Encoder, GaugeVec, Opts, Registry, TextEncoder};

#[derive(Clone, Debug)]
pub struct MetricsRegistry {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    registry: Registry,
    metadata_lookups: CounterVec,
    metadata_mutations: CounterVec,
    create_pending_transactions: GaugeVec,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner::new()),
        }
    }

    /// Counts one point lookup; `outcome` is `hit`, `miss`, or `invalid_handle`.
    pub fn record_lookup(&self, provider: &str, operation: &str, outcome: &str) {
        self.inner
            .metadata_lookups
            .with_label_values(&[provider, operation, outcome])
            .inc();
    }

    /// Counts one mutation attempt; `outcome` is `ok` or `error`.
    pub fn record_mutation(&self, provider: &str, operation: &str, outcome: &str) {
        self.inner
            .metadata_mutations
            .with_label_values(&[provider, operation, outcome])
            .inc();
    }

    /// Sets the live PENDING create-table transaction count for a provider.
    pub fn set_pending_create_transactions(&self, provider: &str, pending: u64) {
        self.inner
            .create_pending_transactions
            .with_label_values(&[provider])
            .set(pending as f64);
    }

    pub fn render_prometheus(&self) -> String {
        let metric_families = self.inner.registry.gather();
        let mut out = Vec::new();
        let enc = TextEncoder::new();
        if enc.encode(&metric_families, &mut out).is_err() {
            return String::new();
        }
        String::from_utf8_lossy(&out).to_string()
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsInner {
    fn new() -> Self {
        let registry = Registry::new();

        let metadata_lookups = counter_vec(
            &registry,
            "fdq_metadata_lookups_total",
            "Point metadata lookups by outcome",
            &["provider", "operation", "outcome"],
        );
        let metadata_mutations = counter_vec(
            &registry,
            "fdq_metadata_mutations_total",
            "Catalog mutation attempts by outcome",
            &["provider", "operation", "outcome"],
        );
        let create_pending_transactions = gauge_vec(
            &registry,
            "fdq_create_pending_transactions",
            "Live PENDING create-table transactions",
            &["provider"],
        );

        Self {
            registry,
            metadata_lookups,
            metadata_mutations,
            create_pending_transactions,
        }
    }
}

fn counter_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> CounterVec {
    let c = CounterVec::new(Opts::new(name, help), labels).expect("counter vec");
    registry
        .register(Box::new(c.clone()))
        .expect("register counter");
    c
}

fn gauge_vec(registry: &Registry, name: &str, help: &str, labels: &[&str]) -> GaugeVec {
    let g = GaugeVec::new(Opts::new(name, help), labels).expect("gauge vec");
    registry
        .register(Box::new(g.clone()))
        .expect("register gauge");
    g
}

static GLOBAL_METRICS: OnceLock<MetricsRegistry> = OnceLock::new();

pub fn global_metrics() -> &'static MetricsRegistry {
    GLOBAL_METRICS.get_or_init(MetricsRegistry::new)
}
