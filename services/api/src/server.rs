use crate::cli::ServeArgs;
use crate::infra::{AppState, QuizState};
use crate::routes::with_quiz_routes;
use archetype_quiz::config::AppConfig;
use archetype_quiz::error::AppError;
use archetype_quiz::quiz::QuizEngine;
use archetype_quiz::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let engine = QuizEngine::standard();
    let quiz_state = QuizState::new(engine, config.quiz.share_base_url.as_str());

    let app = with_quiz_routes(quiz_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        questions = engine.bank().len(),
        commanders = engine.table().len(),
        "archetype quiz ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
