use crate::infra::{AppState, QuizState};
use archetype_quiz::error::AppError;
use archetype_quiz::quiz::scoring::tally;
use archetype_quiz::quiz::{
    decode_share_token, encode_share_token, presets, progress_of, share_link, AnswerSet,
    ColorScores, PresetSummary, Question, QuizProgress, QuizResult, SanitizedAnswers,
    ShareTokenError,
};
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct ResultRequest {
    #[serde(default)]
    pub(crate) answers: AnswerSet,
    #[serde(default)]
    pub(crate) allow_partial: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ScoresResponse {
    pub(crate) answers: SanitizedAnswers<'static>,
    pub(crate) scores: ColorScores,
    pub(crate) progress: QuizProgress,
}

#[derive(Debug, Serialize)]
pub(crate) struct ShareResponse {
    pub(crate) token: String,
    pub(crate) link: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct SharedResultResponse {
    pub(crate) answers: SanitizedAnswers<'static>,
    pub(crate) progress: QuizProgress,
    pub(crate) result: QuizResult,
}

pub(crate) fn quiz_router(state: QuizState) -> Router {
    Router::new()
        .route("/api/v1/quiz/questions", get(questions_endpoint))
        .route("/api/v1/quiz/presets", get(presets_endpoint))
        .route("/api/v1/quiz/scores", post(scores_endpoint))
        .route("/api/v1/quiz/result", post(result_endpoint))
        .route("/api/v1/quiz/share", post(share_endpoint))
        .route("/api/v1/quiz/share/:token", get(shared_result_endpoint))
        .with_state(state)
}

pub(crate) fn with_quiz_routes(state: QuizState) -> Router {
    quiz_router(state)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn questions_endpoint(
    State(state): State<QuizState>,
) -> Json<&'static [Question]> {
    Json(state.engine.bank().questions())
}

pub(crate) async fn presets_endpoint() -> Json<Vec<PresetSummary>> {
    Json(presets().iter().map(|preset| preset.summary()).collect())
}

pub(crate) async fn scores_endpoint(
    State(state): State<QuizState>,
    Json(answers): Json<AnswerSet>,
) -> Json<ScoresResponse> {
    let answers = state.engine.sanitize(&answers);
    Json(ScoresResponse {
        scores: tally(&answers),
        progress: progress_of(&answers),
        answers,
    })
}

pub(crate) async fn result_endpoint(
    State(state): State<QuizState>,
    Json(request): Json<ResultRequest>,
) -> Result<Json<QuizResult>, AppError> {
    let ResultRequest {
        answers,
        allow_partial,
    } = request;

    if !allow_partial {
        state.engine.ensure_complete(&answers)?;
    }
    Ok(Json(state.engine.build_result(&answers)))
}

pub(crate) async fn share_endpoint(
    State(state): State<QuizState>,
    Json(answers): Json<AnswerSet>,
) -> Result<Json<ShareResponse>, AppError> {
    let answers = state.engine.sanitize(&answers);
    if answers.is_empty() {
        return Err(ShareTokenError::NoAnswers.into());
    }

    Ok(Json(ShareResponse {
        token: encode_share_token(&answers),
        link: share_link(&state.share_base_url, &answers),
    }))
}

pub(crate) async fn shared_result_endpoint(
    State(state): State<QuizState>,
    Path(token): Path<String>,
) -> Result<Json<SharedResultResponse>, AppError> {
    let answers = decode_share_token(state.engine.bank(), &token)?;
    debug!(answered = answers.len(), "decoded shared answers");

    Ok(Json(SharedResultResponse {
        progress: progress_of(&answers),
        result: state.engine.result_for(&answers),
        answers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use archetype_quiz::quiz::{find_preset, FallbackTier, QuizEngine};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn quiz_state() -> QuizState {
        QuizState::new(QuizEngine::standard(), "https://quiz.test/play")
    }

    fn app(ready: bool) -> Router {
        let app_state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_quiz_routes(quiz_state()).layer(Extension(app_state))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn readiness_reflects_startup_flag() {
        let response = app(false)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(true)
            .oneshot(Request::get("/ready").body(Body::empty()).expect("request"))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn questions_route_lists_the_bank() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/quiz/questions")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let questions = body.as_array().expect("question array");
        assert_eq!(questions.len(), 8);
        assert_eq!(questions[0]["id"], "opening_hand");
    }

    #[tokio::test]
    async fn scores_route_previews_partial_answers() {
        let response = app(true)
            .oneshot(post_json(
                "/api/v1/quiz/scores",
                json!({ "opening_hand": "C", "toolkit": "Z", "sideboard": "A" }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["answers"], json!({ "opening_hand": "C" }));
        assert_eq!(body["scores"]["red"], 1);
        assert_eq!(body["scores"]["green"], 1);
        assert_eq!(body["progress"]["answered"], 1);
        assert_eq!(body["progress"]["total"], 8);
    }

    #[tokio::test]
    async fn result_route_rejects_incomplete_answers() {
        let response = app(true)
            .oneshot(post_json(
                "/api/v1/quiz/result",
                json!({ "answers": { "opening_hand": "A" } }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = json_body(response).await;
        let missing = body["missing"].as_array().expect("missing ids");
        assert_eq!(missing.len(), 7);
        assert_eq!(missing[0], "midgame_plan");
    }

    #[tokio::test]
    async fn result_route_allows_partial_when_requested() {
        let response = app(true)
            .oneshot(post_json(
                "/api/v1/quiz/result",
                json!({ "answers": {}, "allow_partial": true }),
            ))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["identity_key"], "none");
        assert_eq!(body["fallback"], "undecided");
        assert_eq!(body["commander"]["title"], "Karn, the Great Creator");
    }

    #[tokio::test]
    async fn share_then_open_reproduces_the_result() {
        let preset = find_preset("rakdos-aristocrats").expect("preset exists");
        let Json(shared) = share_endpoint(State(quiz_state()), Json(preset.answers()))
            .await
            .expect("share builds");
        assert_eq!(
            shared.link,
            format!("https://quiz.test/play#{}", shared.token)
        );

        let Json(opened) = shared_result_endpoint(State(quiz_state()), Path(shared.token))
            .await
            .expect("token decodes");
        assert_eq!(opened.progress.percent, 100);
        assert_eq!(opened.result.identity_key.as_str(), "R");
        assert_eq!(opened.result.fallback, FallbackTier::Exact);
    }

    #[tokio::test]
    async fn shared_result_route_rejects_garbage_tokens() {
        let response = app(true)
            .oneshot(
                Request::get("/api/v1/quiz/share/not-a-token!")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn share_route_rejects_empty_answers() {
        let response = app(true)
            .oneshot(post_json("/api/v1/quiz/share", json!({ "sideboard": "A" })))
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
