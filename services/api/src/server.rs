use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_customer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use customer_score::config::AppConfig;
use customer_score::customers::{CustomerService, InMemoryCustomerRepository};
use customer_score::error::AppError;
use customer_score::telemetry;
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

    let repository = Arc::new(InMemoryCustomerRepository::default());
    let customer_service = Arc::new(CustomerService::new(repository));

    let app = with_customer_routes(customer_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "customer score service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
