use crate::cli::ServeArgs;
use crate::infra::{load_config, AppState};
use crate::routes::with_interview_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_tracker::config::AppConfig;
use interview_tracker::error::AppError;
use interview_tracker::interviews::{
    CsvRecordStore, InterviewSession, MemoryRecordStore, RecordStore,
};
use interview_tracker::telemetry;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs, data_file: Option<PathBuf>) -> Result<(), AppError> {
    let mut config = load_config(data_file)?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if args.ephemeral {
        info!("serving interviews from memory; nothing will be written to disk");
        serve(Arc::new(MemoryRecordStore::default()), &config).await
    } else {
        let store = Arc::new(CsvRecordStore::new(config.storage.data_file.clone()));
        serve(store, &config).await
    }
}

async fn serve<S>(store: Arc<S>, config: &AppConfig) -> Result<(), AppError>
where
    S: RecordStore + 'static,
{
    let session = Arc::new(Mutex::new(InterviewSession::start(store)?));

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let app = with_interview_routes(session)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        data_file = %config.storage.data_file.display(),
        "interview dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
