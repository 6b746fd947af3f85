use crate::quiz::answers::AnswerSet;
use crate::quiz::catalog::{Choice, ColorWeight, Question, QuestionBank};
use crate::quiz::domain::{ChoiceKey, Color};
use crate::quiz::recommendations::RecommendationTable;

pub(super) fn answers(pairs: &[(&str, &str)]) -> AnswerSet {
    pairs.iter().copied().collect()
}

/// Every complete answer set for the standard bank, in lexicographic choice order.
pub(super) fn every_complete_answer_set() -> Vec<AnswerSet> {
    let bank = QuestionBank::standard();
    let mut sets = vec![AnswerSet::new()];
    for question in bank.questions() {
        sets = sets
            .into_iter()
            .flat_map(|partial| {
                question.choices.iter().map(move |choice| {
                    let mut next = partial.clone();
                    next.insert(question.id, choice.key.as_str());
                    next
                })
            })
            .collect();
    }
    sets
}

/// Standard table minus the given identity keys.
pub(super) fn table_without(missing: &[&str]) -> RecommendationTable {
    let standard = RecommendationTable::standard();
    RecommendationTable::new(
        standard
            .iter()
            .filter(|(key, _)| !missing.contains(key))
            .map(|(key, recommendation)| (key.to_string(), recommendation.clone())),
    )
}

fn weights(entries: &[(Color, u32)]) -> Vec<ColorWeight> {
    entries
        .iter()
        .map(|(color, weight)| ColorWeight {
            color: *color,
            weight: *weight,
        })
        .collect()
}

/// Two-question bank where white can pull ahead of blue by more than the tolerance.
pub(super) fn white_blue_bank() -> QuestionBank {
    QuestionBank::new(vec![
        Question {
            id: "focus",
            prompt: "Where does your attention go first?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Protect the team",
                    description: "Heavy white lean.",
                    weights: weights(&[(Color::White, 5)]),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Study the table",
                    description: "Split white and blue.",
                    weights: weights(&[(Color::White, 1), (Color::Blue, 1)]),
                },
            ],
        },
        Question {
            id: "tempo",
            prompt: "How fast do you want to play?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Patiently",
                    description: "Blue leaning.",
                    weights: weights(&[(Color::Blue, 2)]),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. No preference",
                    description: "Contributes nothing.",
                    weights: Vec::new(),
                },
            ],
        },
    ])
}
