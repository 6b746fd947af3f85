use super::domain::Color;
use super::identity::IdentityKey;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Commander suggested for a color identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub identity: Cow<'static, str>,
    pub title: Cow<'static, str>,
    pub subtitle: Cow<'static, str>,
    pub summary: Cow<'static, str>,
}

impl Recommendation {
    pub const fn fixed(
        identity: &'static str,
        title: &'static str,
        subtitle: &'static str,
        summary: &'static str,
    ) -> Self {
        Self {
            identity: Cow::Borrowed(identity),
            title: Cow::Borrowed(title),
            subtitle: Cow::Borrowed(subtitle),
            summary: Cow::Borrowed(summary),
        }
    }
}

pub const UNDECIDED: Recommendation = Recommendation::fixed(
    "Colorless",
    "Karn, the Great Creator",
    "A toolbox of artifacts awaits.",
    "Lean on artifacts and utility lands to cover every weakness.",
);

pub const ALL_COLORS: Recommendation = Recommendation::fixed(
    "W U B R G",
    "Kenrith, the Returned King",
    "Every ability in one charismatic package.",
    "Customize your game plan every time you shuffle up.",
);

pub const MONO_WHITE: Recommendation = Recommendation::fixed(
    "W",
    "Light-Paws, Emperor's Voice",
    "Voltron value with protective auras.",
    "Lean into supportive enchantments and combat tricks while defending allies.",
);

const PARTNER_TITLE: &str = "Partner Pairing";
const PARTNER_SUBTITLE: &str = "Combine colors to fit your unique playstyle.";
const PARTNER_SUMMARY: &str =
    "Consider partner commanders or hybrid shells to express all aspects of your plan.";

/// How a recommendation was found, in the order the tiers are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackTier {
    Exact,
    Undecided,
    SingleColorDefault,
    AllColors,
    Synthesized,
}

impl FallbackTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Exact => "Exact match",
            Self::Undecided => "Balanced or undecided",
            Self::SingleColorDefault => "Single color default",
            Self::AllColors => "All colors",
            Self::Synthesized => "Generic pairing",
        }
    }
}

/// Pick the tier for a lookup given whether the key hit and how many colors dominate.
pub fn select_tier(exact_match: bool, color_count: usize) -> FallbackTier {
    if exact_match {
        return FallbackTier::Exact;
    }

    match color_count {
        0 => FallbackTier::Undecided,
        1 => FallbackTier::SingleColorDefault,
        count if count >= 4 => FallbackTier::AllColors,
        _ => FallbackTier::Synthesized,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRecommendation {
    pub tier: FallbackTier,
    pub recommendation: Recommendation,
}

/// Identity key to recommendation lookup with fixed fallbacks for misses.
#[derive(Debug, Clone)]
pub struct RecommendationTable {
    entries: BTreeMap<String, Recommendation>,
    single_color_default: Recommendation,
    all_colors: Recommendation,
}

impl RecommendationTable {
    /// Build a table from `(identity key, recommendation)` pairs.
    ///
    /// The single-color default is the `W` entry when present.
    pub fn new<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Recommendation)>,
    {
        let entries: BTreeMap<String, Recommendation> = entries
            .into_iter()
            .map(|(key, recommendation)| (key.into(), recommendation))
            .collect();
        let single_color_default = entries.get("W").cloned().unwrap_or(MONO_WHITE);

        Self {
            entries,
            single_color_default,
            all_colors: ALL_COLORS,
        }
    }

    pub fn standard() -> &'static RecommendationTable {
        static TABLE: OnceLock<RecommendationTable> = OnceLock::new();
        TABLE.get_or_init(|| RecommendationTable::new(standard_entries()))
    }

    pub fn get(&self, key: &str) -> Option<&Recommendation> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recommendation)> {
        self.entries
            .iter()
            .map(|(key, recommendation)| (key.as_str(), recommendation))
    }

    pub fn resolve(&self, key: &IdentityKey, colors: &[Color]) -> ResolvedRecommendation {
        let exact = self.entries.get(key.as_str());
        let tier = select_tier(exact.is_some(), colors.len());

        let recommendation = match (tier, exact) {
            (FallbackTier::Exact, Some(found)) => found.clone(),
            (FallbackTier::Undecided, _) => UNDECIDED,
            (FallbackTier::SingleColorDefault, _) => self.single_color_default.clone(),
            (FallbackTier::AllColors, _) => self.all_colors.clone(),
            (FallbackTier::Synthesized, _) | (FallbackTier::Exact, None) => {
                synthesized_pairing(colors)
            }
        };

        ResolvedRecommendation {
            tier,
            recommendation,
        }
    }
}

fn synthesized_pairing(colors: &[Color]) -> Recommendation {
    let identity = colors
        .iter()
        .map(|color| color.label())
        .collect::<Vec<_>>()
        .join(", ");

    Recommendation {
        identity: Cow::Owned(identity),
        title: Cow::Borrowed(PARTNER_TITLE),
        subtitle: Cow::Borrowed(PARTNER_SUBTITLE),
        summary: Cow::Borrowed(PARTNER_SUMMARY),
    }
}

fn standard_entries() -> Vec<(&'static str, Recommendation)> {
    vec![
        ("W", MONO_WHITE),
        (
            "U",
            Recommendation::fixed(
                "U",
                "Talrand, Sky Summoner",
                "Instant-speed mastery and flying token pressure.",
                "Every counterspell builds an army while you dictate the stack.",
            ),
        ),
        (
            "B",
            Recommendation::fixed(
                "B",
                "K'rrik, Son of Yawgmoth",
                "Life is a resource and the graveyard is your hand.",
                "Convert life into overwhelming tempo swings and recursion loops.",
            ),
        ),
        (
            "R",
            Recommendation::fixed(
                "R",
                "Torbran, Thane of Red Fell",
                "Each spark becomes a blaze.",
                "Win via combat and direct damage amplified with every source.",
            ),
        ),
        (
            "G",
            Recommendation::fixed(
                "G",
                "Azusa, Lost but Seeking",
                "Lands, lands, and more lands.",
                "Accelerate mana to drop oversized threats ahead of schedule.",
            ),
        ),
        (
            "WU",
            Recommendation::fixed(
                "W U",
                "Brago, King Eternal",
                "Value engines reset every combat step.",
                "Blink your best permanents and lock in incremental advantage.",
            ),
        ),
        (
            "WB",
            Recommendation::fixed(
                "W B",
                "Teysa Karlov",
                "Death triggers pay dividends.",
                "Double up aristocrat triggers while you govern the table.",
            ),
        ),
        (
            "WR",
            Recommendation::fixed(
                "W R",
                "Aurelia, the Warleader",
                "Lead charge after charge until opponents fall.",
                "Multiple combat steps turn a disciplined army into a blazing victory.",
            ),
        ),
        (
            "WG",
            Recommendation::fixed(
                "W G",
                "Sigarda, Heron's Grace",
                "Protect the team while scaling a resilient board.",
                "Blend tokens, anthem effects, and hexproof shields for inevitability.",
            ),
        ),
        (
            "UB",
            Recommendation::fixed(
                "U B",
                "Yuriko, the Tiger's Shadow",
                "Ninja infiltration meets top-deck control.",
                "Chip away with unblockable threats while stacking huge reveals.",
            ),
        ),
        (
            "UR",
            Recommendation::fixed(
                "U R",
                "Veyran, Voice of Duality",
                "Prowess turns every spell into lethal damage.",
                "Copy instants and sorceries to scale your arcane barrage.",
            ),
        ),
        (
            "UG",
            Recommendation::fixed(
                "U G",
                "Tatyova, Benthic Druid",
                "Every land drop is card advantage.",
                "Ramp, draw, and overwhelm with a tide of resources.",
            ),
        ),
        (
            "BR",
            Recommendation::fixed(
                "B R",
                "Anje Falkenrath",
                "Madness-fueled velocity.",
                "Loot furiously, combo off, and recur threats from the grave.",
            ),
        ),
        (
            "BG",
            Recommendation::fixed(
                "B G",
                "Meren of Clan Nel Toth",
                "Experience counters loop your best creatures.",
                "Sacrifice for value, then recur crucial creatures each turn.",
            ),
        ),
        (
            "RG",
            Recommendation::fixed(
                "R G",
                "Xenagos, God of Revels",
                "Hasty power-multiplying party god.",
                "Buff a massive attacker every combat for explosive damage.",
            ),
        ),
        (
            "WUB",
            Recommendation::fixed(
                "W U B",
                "Aminatou, the Fateshifter",
                "Manipulate fate with effortless blink lines.",
                "Top-deck control mixes with blink and combo potential.",
            ),
        ),
        (
            "WUR",
            Recommendation::fixed(
                "W U R",
                "Kykar, Wind's Fury",
                "Spells become spirit armies and mana.",
                "Noncreature spells generate evasive threats and ramp simultaneously.",
            ),
        ),
        (
            "WUG",
            Recommendation::fixed(
                "W U G",
                "Roon of the Hidden Realm",
                "Blink value with a protective body.",
                "Flicker utility creatures and lock up the board.",
            ),
        ),
        (
            "WBR",
            Recommendation::fixed(
                "W B R",
                "Isshin, Two Heavens as One",
                "Double the trigger, double the trouble.",
                "Aggressive combat triggers and go-wide strategies shine here.",
            ),
        ),
        (
            "WBG",
            Recommendation::fixed(
                "W B G",
                "Nethroi, Apex of Death",
                "Mutate recursion with toolbox flexibility.",
                "Reanimate utility creatures and grind value each mutation.",
            ),
        ),
        (
            "WRG",
            Recommendation::fixed(
                "W R G",
                "Marath, Will of the Wild",
                "Adaptable counters and combat leverage.",
                "Flex between tokens, removal, and combat math.",
            ),
        ),
        (
            "UBR",
            Recommendation::fixed(
                "U B R",
                "Kess, Dissident Mage",
                "Flashback every turn for endless storms.",
                "Recast your graveyard to dominate the stack and finish explosively.",
            ),
        ),
        (
            "UBG",
            Recommendation::fixed(
                "U B G",
                "Muldrotha, the Gravetide",
                "Permanent recursion each turn cycle.",
                "Grind advantage from the graveyard while answering threats.",
            ),
        ),
        (
            "URG",
            Recommendation::fixed(
                "U R G",
                "Animar, Soul of Elements",
                "Creature combo with elemental resilience.",
                "Cheat on creature costs and loop value engines to overwhelm the board.",
            ),
        ),
        (
            "BRG",
            Recommendation::fixed(
                "B R G",
                "Korvold, Fae-Cursed King",
                "Sacrifice feeds your unstoppable draw engine.",
                "Treasure, food, and token fodder become cards and counters.",
            ),
        ),
        (
            "WUBR",
            Recommendation::fixed(
                "W U B R",
                "Breya, Etherium Shaper",
                "Artifact combo queen of the shard.",
                "Leverage artifacts for flexible removal, token swarms, and explosive combos.",
            ),
        ),
        (
            "WUBG",
            Recommendation::fixed(
                "W U B G",
                "Atraxa, Praetors' Voice",
                "The queen of value engines and counter synergies.",
                "Combine control, recursion, and board presence seamlessly.",
            ),
        ),
        (
            "WURG",
            Recommendation::fixed(
                "W U R G",
                "Kynaios and Tiro of Meletis",
                "Group hug with precise tempo control.",
                "Share resources to steer the table while setting up your own finish.",
            ),
        ),
        (
            "WBRG",
            Recommendation::fixed(
                "W B R G",
                "Saskia the Unyielding",
                "Combat aggression with a political twist.",
                "Point Saskia wisely to multiply combat damage output.",
            ),
        ),
        (
            "UBRG",
            Recommendation::fixed(
                "U B R G",
                "Yidris, Maelstrom Wielder",
                "Cascade chaos with pinpoint follow-through.",
                "Connect in combat to cascade multiple spells and snowball value.",
            ),
        ),
    ]
}
