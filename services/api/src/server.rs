use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lead_dork::config::AppConfig;
use lead_dork::error::AppError;
use lead_dork::store::SqliteSearchLog;
use lead_dork::telemetry;
use lead_dork::workflows::IntelService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let store = SqliteSearchLog::open(&config.storage.database_path)?;
    let service = Arc::new(IntelService::new(&config.fetch, config.scoring.clone())?);

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(
        prometheus_handle,
        Arc::new(store),
        config.storage.ui_path.clone(),
    );
    let readiness_flag = app_state.readiness.clone();
    let shutdown = app_state.shutdown.clone();

    let app = with_app_routes(service)
        .layer(Extension(app_state))
        .layer(CorsLayer::permissive())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        database = %config.storage.database_path.display(),
        "lead intelligence service ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal(requested: Arc<Notify>) {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "could not listen for interrupt");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = requested.notified() => info!("stopping after shutdown request"),
        _ = interrupt => info!("stopping after interrupt"),
    }
}
