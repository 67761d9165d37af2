use crate::cli::ServeArgs;
use crate::infra::{AppState, DirectoryStores, InMemoryPaperRepository};
use crate::routes::with_conference_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use plenum::config::AppConfig;
use plenum::error::AppError;
use plenum::telemetry;
use plenum::workflows::assignment::AssignmentWeights;
use plenum::workflows::directory::AccessPolicy;
use plenum::workflows::papers::PaperService;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
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
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        weights: Arc::new(Mutex::new(AssignmentWeights::default())),
    };

    let repository = Arc::new(InMemoryPaperRepository::default());
    let paper_service = Arc::new(PaperService::new(repository));
    let stores = DirectoryStores::default();

    let app = with_conference_routes(paper_service, stores, AccessPolicy)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "conference management service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
