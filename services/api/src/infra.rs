use archetype_quiz::quiz::{AnswerSet, QuizEngine};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Shared by every quiz route; the engine only borrows process-wide static data.
#[derive(Clone)]
pub(crate) struct QuizState {
    pub(crate) engine: QuizEngine<'static>,
    pub(crate) share_base_url: Arc<str>,
}

impl QuizState {
    pub(crate) fn new(engine: QuizEngine<'static>, share_base_url: impl Into<Arc<str>>) -> Self {
        Self {
            engine,
            share_base_url: share_base_url.into(),
        }
    }
}

/// Parse `opening_hand=A,comeback=C` into an answer set.
///
/// Unknown ids and keys are kept here; sanitizing against the bank drops them later.
pub(crate) fn parse_answers(raw: &str) -> Result<AnswerSet, String> {
    let mut answers = AnswerSet::new();
    for pair in raw.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (question_id, choice) = pair
            .split_once('=')
            .ok_or_else(|| format!("expected question=KEY, got '{pair}'"))?;
        let question_id = question_id.trim();
        if question_id.is_empty() {
            return Err(format!("missing question id in '{pair}'"));
        }
        answers.insert(question_id, choice.trim());
    }
    Ok(answers)
}
