//! Caller-owned answers and the validate-and-filter step in front of scoring.
//!
//! An [`AnswerSet`] may come from anywhere: a form, a stored file, or a share token
//! minted against an older question bank. [`sanitize`] keeps only the entries that name
//! a known question and one of its choices, producing [`SanitizedAnswers`] that the
//! aggregator can consume without any further checks.

use super::catalog::{Choice, Question, QuestionBank};
use super::domain::ChoiceKey;
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Mapping from question id to the selected choice identifier, as supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnswerSet(BTreeMap<String, String>);

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, question_id: impl Into<String>, choice: impl Into<String>) {
        self.0.insert(question_id.into(), choice.into());
    }

    pub fn remove(&mut self, question_id: &str) -> Option<String> {
        self.0.remove(question_id)
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .map(|(question_id, choice)| (question_id.as_str(), choice.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for AnswerSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(question_id, choice)| (question_id.into(), choice.into()))
                .collect(),
        )
    }
}

// Non-string values are dropped rather than rejected so stale payloads still load.
impl<'de> Deserialize<'de> for AnswerSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
        Ok(Self(
            raw.into_iter()
                .filter_map(|(question_id, value)| match value {
                    serde_json::Value::String(choice) => Some((question_id, choice)),
                    _ => None,
                })
                .collect(),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    question: usize,
    choice: usize,
}

/// Answers that reference only known questions and valid choices, in question-bank order.
///
/// Serializes as a JSON object of question id to choice key.
#[derive(Debug, Clone)]
pub struct SanitizedAnswers<'a> {
    bank: &'a QuestionBank,
    selections: Vec<Selection>,
}

impl<'a> SanitizedAnswers<'a> {
    pub fn empty(bank: &'a QuestionBank) -> Self {
        Self {
            bank,
            selections: Vec::new(),
        }
    }

    pub fn bank(&self) -> &'a QuestionBank {
        self.bank
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.selections.len() == self.bank.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a Question, &'a Choice)> + '_ {
        let questions = self.bank.questions();
        self.selections.iter().map(move |selection| {
            let question = &questions[selection.question];
            (question, &question.choices[selection.choice])
        })
    }

    pub fn choice_for(&self, question_id: &str) -> Option<ChoiceKey> {
        self.iter()
            .find(|(question, _)| question.id == question_id)
            .map(|(_, choice)| choice.key)
    }

    /// Question ids without an answer, in bank order.
    pub fn missing(&self) -> Vec<&'a str> {
        self.bank
            .questions()
            .iter()
            .enumerate()
            .filter(|(index, _)| {
                !self
                    .selections
                    .iter()
                    .any(|selection| selection.question == *index)
            })
            .map(|(_, question)| question.id)
            .collect()
    }

    pub fn to_answer_set(&self) -> AnswerSet {
        self.iter()
            .map(|(question, choice)| (question.id, choice.key.as_str()))
            .collect()
    }
}

impl PartialEq for SanitizedAnswers<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.bank, other.bank) && self.selections == other.selections
    }
}

impl Serialize for SanitizedAnswers<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.selections.len()))?;
        for (question, choice) in self.iter() {
            map.serialize_entry(question.id, choice.key.as_str())?;
        }
        map.end()
    }
}

/// Keep the answers that name a known question and one of its choices.
pub fn sanitize<'a>(bank: &'a QuestionBank, answers: &AnswerSet) -> SanitizedAnswers<'a> {
    let mut selections = Vec::with_capacity(answers.len().min(bank.len()));

    for (question_id, raw_choice) in answers.iter() {
        let Some(position) = bank.position(question_id) else {
            debug!(question_id, "dropping answer for unknown question");
            continue;
        };

        let question = &bank.questions()[position];
        let choice = ChoiceKey::parse(raw_choice).and_then(|key| {
            question
                .choices
                .iter()
                .position(|choice| choice.key == key)
        });

        match choice {
            Some(choice) => selections.push(Selection {
                question: position,
                choice,
            }),
            None => debug!(question_id, choice = raw_choice, "dropping invalid choice"),
        }
    }

    selections.sort_by_key(|selection| selection.question);
    SanitizedAnswers { bank, selections }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_drops_non_string_values() {
        let answers: AnswerSet = serde_json::from_str(
            r#"{"opening_hand":"A","midgame_plan":3,"toolkit":null,"comeback":{"key":"B"}}"#,
        )
        .expect("object deserializes");

        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("opening_hand"), Some("A"));
    }

    #[test]
    fn sanitize_orders_by_bank_and_reports_missing() {
        let bank = QuestionBank::standard();
        let answers: AnswerSet = [("toolkit", "B"), ("opening_hand", "C"), ("legacy", "A")]
            .into_iter()
            .collect();

        let sanitized = sanitize(bank, &answers);

        let ids: Vec<_> = sanitized.iter().map(|(question, _)| question.id).collect();
        assert_eq!(ids, vec!["opening_hand", "toolkit"]);
        assert_eq!(sanitized.choice_for("toolkit"), Some(ChoiceKey::B));
        assert!(!sanitized.is_complete());
        assert_eq!(sanitized.missing().len(), bank.len() - 2);
        assert!(!sanitized.missing().contains(&"toolkit"));
    }

    #[test]
    fn sanitized_answers_serialize_as_plain_map() {
        let bank = QuestionBank::standard();
        let answers: AnswerSet = [("comeback", "A"), ("toolkit", "Z")].into_iter().collect();

        let json = serde_json::to_string(&sanitize(bank, &answers)).expect("serializes");

        assert_eq!(json, r#"{"comeback":"A"}"#);
    }
}
