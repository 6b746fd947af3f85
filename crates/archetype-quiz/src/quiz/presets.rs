use super::answers::AnswerSet;
use super::domain::ChoiceKey;
use serde::Serialize;

/// Named sample answer set for demos and quick starts.
#[derive(Debug, Clone, Copy)]
pub struct Preset {
    pub id: &'static str,
    pub label: &'static str,
    selections: &'static [(&'static str, ChoiceKey)],
}

impl Preset {
    pub fn answers(&self) -> AnswerSet {
        self.selections
            .iter()
            .map(|(question_id, key)| (*question_id, key.as_str()))
            .collect()
    }

    pub fn summary(&self) -> PresetSummary {
        PresetSummary {
            id: self.id,
            label: self.label,
            answers: self.answers(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PresetSummary {
    pub id: &'static str,
    pub label: &'static str,
    pub answers: AnswerSet,
}

static PRESETS: [Preset; 3] = [
    Preset {
        id: "azorius-control",
        label: "Azorius Control (W/U)",
        selections: &[
            ("opening_hand", ChoiceKey::A),
            ("midgame_plan", ChoiceKey::A),
            ("win_condition", ChoiceKey::A),
            ("table_politics", ChoiceKey::A),
            ("problem_solving", ChoiceKey::A),
            ("deck_aesthetic", ChoiceKey::A),
            ("comeback", ChoiceKey::A),
            ("toolkit", ChoiceKey::A),
        ],
    },
    Preset {
        id: "rakdos-aristocrats",
        label: "Rakdos Aristocrats (B/R)",
        selections: &[
            ("opening_hand", ChoiceKey::C),
            ("midgame_plan", ChoiceKey::C),
            ("win_condition", ChoiceKey::C),
            ("table_politics", ChoiceKey::C),
            ("problem_solving", ChoiceKey::C),
            ("deck_aesthetic", ChoiceKey::C),
            ("comeback", ChoiceKey::C),
            ("toolkit", ChoiceKey::C),
        ],
    },
    Preset {
        id: "selesnya-ramp",
        label: "Selesnya Ramp (W/G)",
        selections: &[
            ("opening_hand", ChoiceKey::A),
            ("midgame_plan", ChoiceKey::A),
            ("win_condition", ChoiceKey::B),
            ("table_politics", ChoiceKey::B),
            ("problem_solving", ChoiceKey::A),
            ("deck_aesthetic", ChoiceKey::B),
            ("comeback", ChoiceKey::B),
            ("toolkit", ChoiceKey::A),
        ],
    },
];

pub fn presets() -> &'static [Preset] {
    &PRESETS
}

pub fn find_preset(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}
