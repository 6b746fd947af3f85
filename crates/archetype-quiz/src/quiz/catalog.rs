use super::domain::{ChoiceKey, Color};
use serde::Serialize;
use std::sync::OnceLock;

/// Weight a choice contributes to a single color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColorWeight {
    pub color: Color,
    pub weight: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub key: ChoiceKey,
    pub label: &'static str,
    pub description: &'static str,
    pub weights: Vec<ColorWeight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub choices: Vec<Choice>,
}

impl Question {
    pub fn choice(&self, key: ChoiceKey) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.key == key)
    }
}

/// Ordered, immutable set of questions the quiz asks.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// The shipped question set, built once per process.
    pub fn standard() -> &'static QuestionBank {
        static BANK: OnceLock<QuestionBank> = OnceLock::new();
        BANK.get_or_init(|| QuestionBank::new(standard_questions()))
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|question| question.id == id)
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.questions.iter().position(|question| question.id == id)
    }

    /// Resolve a user-entered selection, reporting which half of it is wrong.
    pub fn select(
        &self,
        question_id: &str,
        choice: &str,
    ) -> Result<(&Question, &Choice), SelectionError> {
        let question = self
            .question(question_id)
            .ok_or_else(|| SelectionError::UnknownQuestion(question_id.to_string()))?;
        let selected = ChoiceKey::parse(choice)
            .and_then(|key| question.choice(key))
            .ok_or_else(|| SelectionError::UnknownChoice {
                question_id: question_id.to_string(),
                choice: choice.to_string(),
            })?;
        Ok((question, selected))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("unknown question '{0}'")]
    UnknownQuestion(String),
    #[error("'{choice}' is not a choice for question '{question_id}'")]
    UnknownChoice { question_id: String, choice: String },
}

fn pair(first: Color, second: Color) -> Vec<ColorWeight> {
    vec![
        ColorWeight {
            color: first,
            weight: 1,
        },
        ColorWeight {
            color: second,
            weight: 1,
        },
    ]
}

fn standard_questions() -> Vec<Question> {
    use Color::{Black, Blue, Green, Red, White};

    vec![
        Question {
            id: "opening_hand",
            prompt: "When you fan open an opening hand, what makes you nod with confidence?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Efficient answers and patient resource development",
                    description: "You want early interaction and smoothing spells so the game starts on your terms.",
                    weights: pair(White, Blue),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Card selection and incremental advantages",
                    description: "Tutors, cantrips, and subtle engines set up the value you plan to harvest later.",
                    weights: pair(Blue, Black),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Explosive mana and proactive threats",
                    description: "Ramp pieces and hard-hitting creatures mean you get to dictate tempo immediately.",
                    weights: pair(Red, Green),
                },
            ],
        },
        Question {
            id: "midgame_plan",
            prompt: "As the table develops, how do you like to steer the mid-game?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Build an efficient board machine",
                    description: "Tokens, counters, and support effects keep your formation solid and helpful.",
                    weights: pair(White, Green),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Keep the stack lively and unpredictable",
                    description: "You prefer a flurry of instants and tempo plays that reward quick thinking.",
                    weights: pair(Blue, Red),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Pressure life totals relentlessly",
                    description: "Sacrifice outlets, burn, and aggressive creatures keep everyone on the back foot.",
                    weights: pair(Black, Red),
                },
            ],
        },
        Question {
            id: "win_condition",
            prompt: "What does a satisfying win look like to you?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Slowly drain away resistance",
                    description: "Attrition, taxation, and inevitability grind out the final life points.",
                    weights: pair(White, Black),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Triumph with coordinated combat",
                    description: "A disciplined strike team or battalion closes the door with precision swings.",
                    weights: pair(White, Red),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Overwhelm with recursion and growth",
                    description: "Graveyard engines and resilient threats make removal feel pointless.",
                    weights: pair(Black, Green),
                },
            ],
        },
        Question {
            id: "table_politics",
            prompt: "Table politics flare up. What is your instinctive move?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Negotiate from a calm position of control",
                    description: "Offer protection, propose ceasefires, and keep order through diplomacy.",
                    weights: pair(White, Blue),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Broker deals that advance everyone",
                    description: "Leverage shared growth, card draw, and collective ramp to earn trust.",
                    weights: pair(Green, Blue),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Wield threats as leverage",
                    description: "Make it clear that crossing you leads to immediate consequences.",
                    weights: pair(Black, Red),
                },
            ],
        },
        Question {
            id: "problem_solving",
            prompt: "A player threatens to combo off. How do you respond?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Rally defenses and lock the table down",
                    description: "Protective permanents and team-wide buffs shield against sudden swings.",
                    weights: pair(White, Green),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Dig for precise interaction",
                    description: "You rely on card selection to find the exact countermeasure you need.",
                    weights: pair(Blue, Black),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Turn up the pressure immediately",
                    description: "Force opponents onto the back foot with combat and damage to end the game first.",
                    weights: pair(Red, Green),
                },
            ],
        },
        Question {
            id: "deck_aesthetic",
            prompt: "Which deck aesthetic are you most excited to sleeve up?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Gothic cathedrals and solemn rituals",
                    description: "Themes of duty, retribution, and carefully orchestrated order speak to you.",
                    weights: pair(White, Black),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Verdant laboratories and living spells",
                    description: "Organic growth meets arcane experimentation in your ideal deck vibe.",
                    weights: pair(Green, Blue),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Martial banners and heroic charge",
                    description: "You love the spectacle of warriors, dragons, and blazing battlefields.",
                    weights: pair(White, Red),
                },
            ],
        },
        Question {
            id: "comeback",
            prompt: "When you fall behind, what is the comeback plan?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Establish layered defenses",
                    description: "Board wipes, protection, and clean answers reset the pace in your favor.",
                    weights: pair(White, Blue),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Lean on inevitability from the graveyard",
                    description: "Value engines recycle key permanents until you reassemble your engine.",
                    weights: pair(Black, Green),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Intimidate the table with explosive plays",
                    description: "Revenge triggers and burn make opponents think twice about finishing you off.",
                    weights: pair(Black, Red),
                },
            ],
        },
        Question {
            id: "toolkit",
            prompt: "What is your Commander toolkit without fail?",
            choices: vec![
                Choice {
                    key: ChoiceKey::A,
                    label: "A. Tutors for enchantments and utility creatures",
                    description: "You ensure the right silver bullets are always within reach.",
                    weights: pair(White, Green),
                },
                Choice {
                    key: ChoiceKey::B,
                    label: "B. Instant-speed tricks and spell copying",
                    description: "You stockpile reactive tools that scale with every cast.",
                    weights: pair(Blue, Red),
                },
                Choice {
                    key: ChoiceKey::C,
                    label: "C. Ramp, haste, and combat upgrades",
                    description: "Mana bursts and battle-ready boosters keep your threats lethal.",
                    weights: pair(Red, Green),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_bank_has_unique_ids_and_valid_choices() {
        let bank = QuestionBank::standard();
        assert_eq!(bank.len(), 8);

        let ids: HashSet<_> = bank.questions().iter().map(|question| question.id).collect();
        assert_eq!(ids.len(), bank.len(), "question ids must be unique");

        for question in bank.questions() {
            assert!(
                (2..=4).contains(&question.choices.len()),
                "{} has {} choices",
                question.id,
                question.choices.len()
            );
            for choice in &question.choices {
                assert!(choice.weights.iter().all(|entry| entry.weight > 0));
            }
        }
    }

    #[test]
    fn select_distinguishes_unknown_question_from_unknown_choice() {
        let bank = QuestionBank::standard();

        let (question, choice) = bank.select("toolkit", "C").expect("valid selection");
        assert_eq!(question.id, "toolkit");
        assert_eq!(choice.key, ChoiceKey::C);

        assert_eq!(
            bank.select("sideboard", "A").expect_err("unknown question"),
            SelectionError::UnknownQuestion("sideboard".to_string())
        );
        assert!(matches!(
            bank.select("toolkit", "D"),
            Err(SelectionError::UnknownChoice { .. })
        ));
    }
}
