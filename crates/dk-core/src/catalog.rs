//! The static stat catalog: every stat of the Dodeka ruleset.
//!
//! The catalog is a fixed 40-stat forest rooted at Level: 1 Level,
//! 3 Realms, 9 Attributes, and 27 Skills. It is initialized once at
//! first use and never mutated; all tree navigation (parents, children,
//! ancestor chains) goes through it.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The four ranks of the stat hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// The single root stat, representing overall character power.
    Level,
    /// One of the three broad domains (Body, Mind, Soul).
    Realm,
    /// A specific capability within a realm (STR, WIS, ...).
    Attribute,
    /// A trained application of an attribute (Muscles, Stealth, ...).
    Skill,
}

impl Tier {
    /// The allocation multiplier for this tier as an exact ratio
    /// (numerator, denominator).
    ///
    /// A node's self value is `ceil(points * multiplier)`: 1/4 for Level,
    /// 1/2 for Realms, 1 for Attributes and Skills.
    pub fn multiplier(self) -> (i32, i32) {
        match self {
            Self::Level => (1, 4),
            Self::Realm => (1, 2),
            Self::Attribute | Self::Skill => (1, 1),
        }
    }

    /// Whether base values at this tier are clamped to the character's
    /// raw Level points.
    ///
    /// Level itself is the cap and Skills are exempt: once a Skill's
    /// Attribute and Realm parents were capped one tier up, the Skill may
    /// legitimately exceed Level.
    pub fn level_capped(self) -> bool {
        matches!(self, Self::Realm | Self::Attribute)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level => write!(f, "Level"),
            Self::Realm => write!(f, "Realm"),
            Self::Attribute => write!(f, "Attribute"),
            Self::Skill => write!(f, "Skill"),
        }
    }
}

/// A catalog entry: one stat of the ruleset.
///
/// Immutable after module load. Equality is by name, which is unique
/// across the catalog.
#[derive(Debug, Clone, Copy)]
pub struct StatType {
    /// Canonical stat name, also the key in character property maps.
    pub name: &'static str,
    /// Hierarchy tier.
    pub tier: Tier,
    /// Name of the parent stat, `None` only for Level.
    pub parent: Option<&'static str>,
    /// One-line human description.
    pub summary: &'static str,
}

impl PartialEq for StatType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for StatType {}

impl fmt::Display for StatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

const STATS: &[StatType] = &[
    StatType {
        name: "Level",
        tier: Tier::Level,
        parent: None,
        summary: "Overall character power; the pool every other stat draws from.",
    },
    // Realms
    StatType {
        name: "Body",
        tier: Tier::Realm,
        parent: Some("Level"),
        summary: "Physical prowess, health, and coordination.",
    },
    StatType {
        name: "Mind",
        tier: Tier::Realm,
        parent: Some("Level"),
        summary: "Reason, memory, and perception.",
    },
    StatType {
        name: "Soul",
        tier: Tier::Realm,
        parent: Some("Level"),
        summary: "Presence, will, and fortune.",
    },
    // Body attributes
    StatType {
        name: "STR",
        tier: Tier::Attribute,
        parent: Some("Body"),
        summary: "Raw muscle and the force behind every blow.",
    },
    StatType {
        name: "DEX",
        tier: Tier::Attribute,
        parent: Some("Body"),
        summary: "Agility, balance, and fine motor control.",
    },
    StatType {
        name: "CON",
        tier: Tier::Attribute,
        parent: Some("Body"),
        summary: "Toughness and resistance to harm and fatigue.",
    },
    // Mind attributes
    StatType {
        name: "INT",
        tier: Tier::Attribute,
        parent: Some("Mind"),
        summary: "Learning, deduction, and recall.",
    },
    StatType {
        name: "WIS",
        tier: Tier::Attribute,
        parent: Some("Mind"),
        summary: "Judgement, intuition, and practical knowledge.",
    },
    StatType {
        name: "PER",
        tier: Tier::Attribute,
        parent: Some("Mind"),
        summary: "Noticing what others miss.",
    },
    // Soul attributes
    StatType {
        name: "CHA",
        tier: Tier::Attribute,
        parent: Some("Soul"),
        summary: "Charm, command, and social gravity.",
    },
    StatType {
        name: "WIL",
        tier: Tier::Attribute,
        parent: Some("Soul"),
        summary: "Mental fortitude and single-mindedness.",
    },
    StatType {
        name: "FOR",
        tier: Tier::Attribute,
        parent: Some("Soul"),
        summary: "Fortune; the favor of chance itself.",
    },
    // STR skills
    StatType {
        name: "Muscles",
        tier: Tier::Skill,
        parent: Some("STR"),
        summary: "Lifting, dragging, and breaking things.",
    },
    StatType {
        name: "Athletics",
        tier: Tier::Skill,
        parent: Some("STR"),
        summary: "Running, jumping, climbing, and swimming.",
    },
    StatType {
        name: "Brawling",
        tier: Tier::Skill,
        parent: Some("STR"),
        summary: "Unarmed and improvised fighting.",
    },
    // DEX skills
    StatType {
        name: "Acrobatics",
        tier: Tier::Skill,
        parent: Some("DEX"),
        summary: "Tumbling, dodging, and keeping your feet.",
    },
    StatType {
        name: "Stealth",
        tier: Tier::Skill,
        parent: Some("DEX"),
        summary: "Moving unseen and unheard.",
    },
    StatType {
        name: "Marksmanship",
        tier: Tier::Skill,
        parent: Some("DEX"),
        summary: "Hitting distant targets with thrown or launched weapons.",
    },
    // CON skills
    StatType {
        name: "Endurance",
        tier: Tier::Skill,
        parent: Some("CON"),
        summary: "Sustained effort over hours or days.",
    },
    StatType {
        name: "Fortitude",
        tier: Tier::Skill,
        parent: Some("CON"),
        summary: "Shrugging off poison, disease, and the elements.",
    },
    StatType {
        name: "Vigor",
        tier: Tier::Skill,
        parent: Some("CON"),
        summary: "Bursts of physical resilience.",
    },
    // INT skills
    StatType {
        name: "Logic",
        tier: Tier::Skill,
        parent: Some("INT"),
        summary: "Puzzles, ciphers, and structured reasoning.",
    },
    StatType {
        name: "Lore",
        tier: Tier::Skill,
        parent: Some("INT"),
        summary: "History, legends, and book learning.",
    },
    StatType {
        name: "Medicine",
        tier: Tier::Skill,
        parent: Some("INT"),
        summary: "Treating wounds and diagnosing ailments.",
    },
    // WIS skills
    StatType {
        name: "Insight",
        tier: Tier::Skill,
        parent: Some("WIS"),
        summary: "Reading motives and spotting lies.",
    },
    StatType {
        name: "Survival",
        tier: Tier::Skill,
        parent: Some("WIS"),
        summary: "Foraging, tracking weather, and living off the land.",
    },
    StatType {
        name: "Crafting",
        tier: Tier::Skill,
        parent: Some("WIS"),
        summary: "Making and mending tools, gear, and shelter.",
    },
    // PER skills
    StatType {
        name: "Awareness",
        tier: Tier::Skill,
        parent: Some("PER"),
        summary: "Passive alertness to danger.",
    },
    StatType {
        name: "Investigation",
        tier: Tier::Skill,
        parent: Some("PER"),
        summary: "Deliberate searching and deduction from detail.",
    },
    StatType {
        name: "Tracking",
        tier: Tier::Skill,
        parent: Some("PER"),
        summary: "Following trails and signs.",
    },
    // CHA skills
    StatType {
        name: "Persuasion",
        tier: Tier::Skill,
        parent: Some("CHA"),
        summary: "Winning people over honestly.",
    },
    StatType {
        name: "Deception",
        tier: Tier::Skill,
        parent: Some("CHA"),
        summary: "Lies, disguises, and misdirection.",
    },
    StatType {
        name: "Performance",
        tier: Tier::Skill,
        parent: Some("CHA"),
        summary: "Holding an audience: song, story, or spectacle.",
    },
    // WIL skills
    StatType {
        name: "Resolve",
        tier: Tier::Skill,
        parent: Some("WIL"),
        summary: "Standing firm against fear and coercion.",
    },
    StatType {
        name: "Concentration",
        tier: Tier::Skill,
        parent: Some("WIL"),
        summary: "Keeping focus through pain and distraction.",
    },
    StatType {
        name: "Courage",
        tier: Tier::Skill,
        parent: Some("WIL"),
        summary: "Acting despite the odds.",
    },
    // FOR skills
    StatType {
        name: "Gambling",
        tier: Tier::Skill,
        parent: Some("FOR"),
        summary: "Games of chance and reading the table.",
    },
    StatType {
        name: "Omens",
        tier: Tier::Skill,
        parent: Some("FOR"),
        summary: "Reading portents and sensing turns of fate.",
    },
    StatType {
        name: "Serendipity",
        tier: Tier::Skill,
        parent: Some("FOR"),
        summary: "Being in the right place at the right time.",
    },
];

/// The process-wide stat catalog.
///
/// Obtain it via [`catalog`]; there is exactly one instance.
#[derive(Debug)]
pub struct Catalog {
    by_name: HashMap<&'static str, usize>,
}

static CATALOG: LazyLock<Catalog> = LazyLock::new(|| {
    let by_name = STATS
        .iter()
        .enumerate()
        .map(|(idx, stat)| (stat.name, idx))
        .collect();
    Catalog { by_name }
});

/// Access the global stat catalog.
pub fn catalog() -> &'static Catalog {
    &CATALOG
}

impl Catalog {
    /// Look up a stat by its canonical name.
    pub fn get(&self, name: &str) -> Option<&'static StatType> {
        self.by_name.get(name).map(|&idx| &STATS[idx])
    }

    /// Look up a stat by name, erroring on an unknown name.
    pub fn require(&self, name: &str) -> CoreResult<&'static StatType> {
        self.get(name)
            .ok_or_else(|| CoreError::UnknownStat(name.to_string()))
    }

    /// Position of a stat in catalog order.
    ///
    /// Parents always precede their children.
    pub fn index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Look up a stat by name, ignoring case.
    pub fn find(&self, name: &str) -> Option<&'static StatType> {
        self.get(name)
            .or_else(|| STATS.iter().find(|s| s.name.eq_ignore_ascii_case(name)))
    }

    /// Iterate all stats in catalog order (Level, Realms, Attributes, Skills).
    pub fn iter(&self) -> impl Iterator<Item = &'static StatType> {
        STATS.iter()
    }

    /// Number of stats in the catalog.
    pub fn len(&self) -> usize {
        STATS.len()
    }

    /// Always false; the catalog is never empty.
    pub fn is_empty(&self) -> bool {
        STATS.is_empty()
    }

    /// The parent of a stat, `None` for Level.
    pub fn parent(&self, stat: &StatType) -> Option<&'static StatType> {
        stat.parent.and_then(|name| self.get(name))
    }

    /// Direct children of a stat, in catalog order.
    pub fn children(&self, name: &str) -> Vec<&'static StatType> {
        STATS.iter().filter(|s| s.parent == Some(name)).collect()
    }

    /// Ancestor chain of a stat, nearest parent first, ending at Level.
    pub fn ancestors(&self, stat: &StatType) -> Vec<&'static StatType> {
        let mut chain = Vec::new();
        let mut current = self.parent(stat);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// Whether `stat` equals `ancestor` or sits below it in the hierarchy.
    pub fn is_same_or_descendant(&self, stat: &StatType, ancestor: &str) -> bool {
        if stat.name == ancestor {
            return true;
        }
        self.ancestors(stat).iter().any(|a| a.name == ancestor)
    }
}
