use chrono::NaiveDate;
use enrollment_pricing::config::PricingConfig;
use enrollment_pricing::pricing::{PricingTableError, QuoteEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Engine over the table at `path`, or over the built-in table when absent.
pub(crate) fn engine_from_path(path: Option<&Path>) -> Result<QuoteEngine, PricingTableError> {
    let config = PricingConfig {
        table_path: path.map(Path::to_path_buf),
    };
    QuoteEngine::new(config.load_table()?)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
