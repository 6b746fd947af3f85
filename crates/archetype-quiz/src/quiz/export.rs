use super::answers::{AnswerSet, SanitizedAnswers};
use super::domain::ColorScores;
use super::engine::QuizResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Downloadable snapshot of a finished quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultExport {
    pub exported_at: DateTime<Utc>,
    pub answers: AnswerSet,
    pub scores: ColorScores,
    pub result: QuizResult,
}

impl ResultExport {
    pub fn new(
        answers: &SanitizedAnswers<'_>,
        result: QuizResult,
        exported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            exported_at,
            answers: answers.to_answer_set(),
            scores: result.scores,
            result,
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
