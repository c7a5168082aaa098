use crate::cli::ServeArgs;
use crate::infra::{board_from_config, AppState, TracingOrderListener};
use crate::routes::with_rule_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use loan_rules::config::AppConfig;
use loan_rules::error::AppError;
use loan_rules::rules::RuleBoardService;
use loan_rules::telemetry;
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

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let board = board_from_config(&config.board)?;
    let listener = Arc::new(TracingOrderListener::default());
    let rule_service = Arc::new(RuleBoardService::new(board, listener));

    let app = with_rule_routes(rule_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, density = %config.board.default_density, "loan rule board ready");

    axum::serve(listener, app).await?;
    Ok(())
}
