use super::answers::{sanitize, AnswerSet, SanitizedAnswers};
use super::catalog::QuestionBank;
use super::domain::{Color, ColorScores};
use super::identity::{self, IdentityKey};
use super::recommendations::{
    FallbackTier, Recommendation, RecommendationTable, ResolvedRecommendation,
};
use super::scoring::tally;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Everything a caller needs to present a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub identity_key: IdentityKey,
    pub identity_label: String,
    pub colors: Vec<Color>,
    pub scores: ColorScores,
    pub commander: Recommendation,
    pub fallback: FallbackTier,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizProgress {
    pub answered: usize,
    pub total: usize,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("answer every question to unlock your color identity ({} unanswered)", .missing.len())]
pub struct IncompleteAnswers {
    pub missing: Vec<String>,
}

/// Stateless scorer bound to a question bank and recommendation table.
#[derive(Debug, Clone, Copy)]
pub struct QuizEngine<'a> {
    bank: &'a QuestionBank,
    table: &'a RecommendationTable,
}

impl QuizEngine<'static> {
    pub fn standard() -> Self {
        Self::new(QuestionBank::standard(), RecommendationTable::standard())
    }
}

impl Default for QuizEngine<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> QuizEngine<'a> {
    pub fn new(bank: &'a QuestionBank, table: &'a RecommendationTable) -> Self {
        Self { bank, table }
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn table(&self) -> &'a RecommendationTable {
        self.table
    }

    pub fn sanitize(&self, answers: &AnswerSet) -> SanitizedAnswers<'a> {
        sanitize(self.bank, answers)
    }

    pub fn aggregate(&self, answers: &AnswerSet) -> ColorScores {
        tally(&self.sanitize(answers))
    }

    pub fn progress(&self, answers: &AnswerSet) -> QuizProgress {
        progress_of(&self.sanitize(answers))
    }

    /// Caller-side gate before [`QuizEngine::build_result`]; the result itself never requires it.
    pub fn ensure_complete(&self, answers: &AnswerSet) -> Result<(), IncompleteAnswers> {
        let sanitized = self.sanitize(answers);
        if sanitized.is_complete() {
            return Ok(());
        }

        Err(IncompleteAnswers {
            missing: sanitized
                .missing()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn resolve_recommendation(
        &self,
        key: &IdentityKey,
        colors: &[Color],
    ) -> ResolvedRecommendation {
        self.table.resolve(key, colors)
    }

    pub fn build_result(&self, answers: &AnswerSet) -> QuizResult {
        self.result_for(&self.sanitize(answers))
    }

    pub fn result_for(&self, answers: &SanitizedAnswers<'_>) -> QuizResult {
        let scores = tally(answers);
        let identity::ColorIdentity { colors, key } = identity::resolve(&scores);
        let ResolvedRecommendation {
            tier,
            recommendation,
        } = self.resolve_recommendation(&key, &colors);

        debug!(
            identity = %key,
            tier = tier.label(),
            answered = answers.len(),
            "resolved color identity"
        );

        QuizResult {
            identity_label: identity::identity_label(&colors),
            identity_key: key,
            colors,
            scores,
            commander: recommendation,
            fallback: tier,
        }
    }
}

pub fn progress_of(answers: &SanitizedAnswers<'_>) -> QuizProgress {
    let answered = answers.len();
    let total = answers.bank().len();
    let percent = if total == 0 {
        100
    } else {
        ((answered as f64 / total as f64) * 100.0).round() as u8
    };

    QuizProgress {
        answered,
        total,
        percent,
    }
}
