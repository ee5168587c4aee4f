use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_quote_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use enrollment_pricing::config::AppConfig;
use enrollment_pricing::error::AppError;
use enrollment_pricing::pricing::QuoteEngine;
use enrollment_pricing::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let table = config.pricing.load_table()?;
    let engine = Arc::new(QuoteEngine::new(table)?);
    let source = match &config.pricing.table_path {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };
    info!(%source, currency = %engine.table().default_currency, "pricing table loaded");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_quote_routes(engine)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "enrollment quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
