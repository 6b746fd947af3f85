//! Color identity scoring: answers in, Commander recommendation out.

pub mod answers;
pub mod catalog;
pub mod domain;
mod engine;
pub mod export;
pub mod identity;
pub mod presets;
pub mod recommendations;
pub mod scoring;
pub mod share;
pub mod store;

#[cfg(test)]
mod tests;

pub use answers::{sanitize, AnswerSet, SanitizedAnswers};
pub use catalog::{Choice, ColorWeight, Question, QuestionBank, SelectionError};
pub use domain::{ChoiceKey, Color, ColorScores};
pub use engine::{progress_of, IncompleteAnswers, QuizEngine, QuizProgress, QuizResult};
pub use export::ResultExport;
pub use identity::{ColorIdentity, IdentityKey, TOLERANCE};
pub use presets::{find_preset, presets, Preset, PresetSummary};
pub use recommendations::{
    select_tier, FallbackTier, Recommendation, RecommendationTable, ResolvedRecommendation,
};
pub use share::{decode_share_token, encode_share_token, share_link, ShareTokenError};
pub use store::{AnswerStore, AnswerStoreError};

/// Live score preview against the standard question bank.
pub fn aggregate(answers: &AnswerSet) -> ColorScores {
    QuizEngine::standard().aggregate(answers)
}

/// Full result against the standard question bank and recommendation table.
pub fn build_result(answers: &AnswerSet) -> QuizResult {
    QuizEngine::standard().build_result(answers)
}
