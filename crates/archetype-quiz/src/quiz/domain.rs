use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five scoring axes. Declaration order is the canonical precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub const COUNT: usize = 5;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [Self::White, Self::Blue, Self::Black, Self::Red, Self::Green]
    }

    /// Position in the W, U, B, R, G precedence.
    pub const fn precedence(self) -> usize {
        match self {
            Self::White => 0,
            Self::Blue => 1,
            Self::Black => 2,
            Self::Red => 3,
            Self::Green => 4,
        }
    }

    pub const fn code(self) -> char {
        match self {
            Self::White => 'W',
            Self::Blue => 'U',
            Self::Black => 'B',
            Self::Red => 'R',
            Self::Green => 'G',
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::White => "White",
            Self::Blue => "Blue",
            Self::Black => "Black",
            Self::Red => "Red",
            Self::Green => "Green",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::White => "Order, balance, community, and structure.",
            Self::Blue => "Knowledge, control, and inevitability.",
            Self::Black => "Ambition, recursion, and ruthless efficiency.",
            Self::Red => "Emotion, velocity, and explosive finishers.",
            Self::Green => "Growth, resilience, and overwhelming board presence.",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifier of a choice within a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ChoiceKey {
    A,
    B,
    C,
    D,
}

impl ChoiceKey {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for ChoiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-color totals. Every color always has an entry, starting at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorScores {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
}

impl ColorScores {
    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    pub(crate) fn add(&mut self, color: Color, weight: u32) {
        let slot = match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        };
        *slot = slot.saturating_add(weight);
    }

    /// Entries in canonical color order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, u32)> + '_ {
        Color::ordered()
            .into_iter()
            .map(move |color| (color, self.get(color)))
    }

    pub fn max(&self) -> u32 {
        self.iter().map(|(_, score)| score).max().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.iter()
            .fold(0u32, |total, (_, score)| total.saturating_add(score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_order_matches_precedence() {
        for (index, color) in Color::ordered().into_iter().enumerate() {
            assert_eq!(color.precedence(), index);
        }
        let codes: String = Color::ordered().into_iter().map(Color::code).collect();
        assert_eq!(codes, "WUBRG");
    }

    #[test]
    fn scores_serialize_every_color() {
        let mut scores = ColorScores::default();
        scores.add(Color::Red, 3);

        let value = serde_json::to_value(scores).expect("scores serialize");
        let object = value.as_object().expect("scores serialize as a map");

        assert_eq!(object.len(), Color::COUNT);
        assert_eq!(object["red"], 3);
        assert_eq!(object["white"], 0);
    }

    #[test]
    fn choice_keys_parse_exact_letters_only() {
        assert_eq!(ChoiceKey::parse("B"), Some(ChoiceKey::B));
        assert_eq!(ChoiceKey::parse("b"), None);
        assert_eq!(ChoiceKey::parse(" A"), None);
        assert_eq!(ChoiceKey::parse("E"), None);
    }
}
