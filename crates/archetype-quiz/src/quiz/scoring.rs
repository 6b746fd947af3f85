use super::answers::{sanitize, AnswerSet, SanitizedAnswers};
use super::catalog::QuestionBank;
use super::domain::ColorScores;

/// Sum the color weights of every sanitized selection.
pub fn tally(answers: &SanitizedAnswers<'_>) -> ColorScores {
    let mut scores = ColorScores::default();
    for (_, choice) in answers.iter() {
        for entry in &choice.weights {
            scores.add(entry.color, entry.weight);
        }
    }
    scores
}

/// Score raw answers against `bank`. Unknown questions and invalid choices contribute nothing.
pub fn aggregate(bank: &QuestionBank, answers: &AnswerSet) -> ColorScores {
    tally(&sanitize(bank, answers))
}
