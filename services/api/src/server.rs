use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::router;
use axum::extract::DefaultBodyLimit;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use onboarding_ai::config::AppConfig;
use onboarding_ai::error::AppError;
use onboarding_ai::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = router()
        .layer(DefaultBodyLimit::max(config.server.body_limit_bytes))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        body_limit_bytes = config.server.body_limit_bytes,
        "onboarding engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
