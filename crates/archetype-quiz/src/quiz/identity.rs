use super::domain::{Color, ColorScores};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Colors within this many points of the leader count as co-dominant.
pub const TOLERANCE: u32 = 2;

pub const MAX_IDENTITY_COLORS: usize = Color::COUNT;

/// Canonical lookup key for a color identity, e.g. `WU` or `WBG`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    pub const NONE: &'static str = "none";

    pub fn none() -> Self {
        Self(Self::NONE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_none(&self) -> bool {
        self.0 == Self::NONE
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Dominant colors in display order plus the canonical key derived from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorIdentity {
    pub colors: Vec<Color>,
    pub key: IdentityKey,
}

pub fn resolve(scores: &ColorScores) -> ColorIdentity {
    let max_score = scores.max();
    if max_score == 0 {
        return ColorIdentity {
            colors: Vec::new(),
            key: IdentityKey::none(),
        };
    }

    let mut colors: Vec<Color> = scores
        .iter()
        .filter(|(_, score)| *score > 0 && max_score - score <= TOLERANCE)
        .map(|(color, _)| color)
        .collect();
    colors.sort_by(|left, right| {
        scores
            .get(*right)
            .cmp(&scores.get(*left))
            .then_with(|| left.precedence().cmp(&right.precedence()))
    });
    colors.truncate(MAX_IDENTITY_COLORS);

    let key = canonical_key(&colors);
    ColorIdentity { colors, key }
}

/// Letter codes in W, U, B, R, G order regardless of the order `colors` arrives in.
pub fn canonical_key(colors: &[Color]) -> IdentityKey {
    if colors.is_empty() {
        return IdentityKey::none();
    }

    let mut ordered = colors.to_vec();
    ordered.sort_by_key(|color| color.precedence());
    ordered.dedup();
    IdentityKey(ordered.into_iter().map(Color::code).collect())
}

pub fn identity_label(colors: &[Color]) -> String {
    if colors.is_empty() {
        return "Colorless".to_string();
    }

    colors
        .iter()
        .map(|color| color.label())
        .collect::<Vec<_>>()
        .join(" / ")
}
