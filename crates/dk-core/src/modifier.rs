//! Stat modifiers: inherent, circumstantial, and their resolved forms.
//!
//! Inherent modifiers come from character build choices (race, class,
//! feats, equipment) and live on the tree; circumstance modifiers are
//! transient and supplied per query. A modifier placed on a stat also
//! affects every descendant of that stat, resolved by walking the
//! queried stat's ancestor chain at query time — modifier storage stays
//! flat and never needs pre-expansion onto descendants.

use serde::{Deserialize, Serialize};

use crate::catalog::{StatType, catalog};

/// Where a modifier comes from.
///
/// A closed set: serializers dispatch on the variant tag, never on
/// runtime type identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierSource {
    /// A feat or talent picked at character creation or level-up.
    Feat,
    /// Worn or wielded equipment.
    Equipment,
    /// A transient situational factor.
    Circumstance,
    /// A crafted component slotted into gear.
    Component,
    /// A permanent bodily or magical augmentation.
    Augmentation,
}

impl std::fmt::Display for ModifierSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feat => write!(f, "feat"),
            Self::Equipment => write!(f, "equipment"),
            Self::Circumstance => write!(f, "circumstance"),
            Self::Component => write!(f, "component"),
            Self::Augmentation => write!(f, "augmentation"),
        }
    }
}

/// A named bonus stored on the stat tree, targeting one stat.
///
/// Applies to the target stat and all of its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InherentModifier {
    /// Display name (e.g. "Giant's Belt").
    pub name: String,
    /// What grants this modifier.
    pub source: ModifierSource,
    /// Name of the targeted stat.
    pub stat: String,
    /// Signed bonus.
    pub value: i32,
}

impl InherentModifier {
    /// Create a new inherent modifier.
    pub fn new(
        name: impl Into<String>,
        source: ModifierSource,
        stat: impl Into<String>,
        value: i32,
    ) -> Self {
        Self {
            name: name.into(),
            source,
            stat: stat.into(),
            value,
        }
    }

    /// Whether this modifier applies to the given stat.
    ///
    /// True when the queried stat is the target or a descendant of it.
    pub fn applies_to(&self, stat: &StatType) -> bool {
        catalog().is_same_or_descendant(stat, &self.stat)
    }
}

/// A transient, situational bonus supplied only at query time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircumstanceModifier {
    /// Display name (e.g. "High Ground").
    pub name: String,
    /// What grants this modifier.
    pub source: ModifierSource,
    /// Signed bonus.
    pub value: i32,
}

impl CircumstanceModifier {
    /// Create a new circumstance modifier.
    pub fn new(name: impl Into<String>, source: ModifierSource, value: i32) -> Self {
        Self {
            name: name.into(),
            source,
            value,
        }
    }
}

/// One modifier as applied to a computed stat value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedModifier {
    /// Display name of the originating modifier.
    pub name: String,
    /// What granted it.
    pub source: ModifierSource,
    /// Signed bonus.
    pub value: i32,
}

/// A fully resolved stat value, ready to back a check.
///
/// `value` is always `base` plus the sum of `applied`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatModifier {
    /// Name of the resolved stat.
    pub stat: String,
    /// Post-cap base value from raw allocation.
    pub base: i32,
    /// Every nonzero modifier that applied.
    pub applied: Vec<AppliedModifier>,
    /// Final value: base plus all applied modifiers.
    pub value: i32,
}

impl StatModifier {
    /// Build a resolved modifier, computing the final value.
    pub fn new(stat: impl Into<String>, base: i32, applied: Vec<AppliedModifier>) -> Self {
        let value = base + applied.iter().map(|m| m.value).sum::<i32>();
        Self {
            stat: stat.into(),
            base,
            applied,
            value,
        }
    }

    /// Copy with one extra circumstance modifier appended.
    ///
    /// Zero-value modifiers are dropped rather than appended.
    pub fn with_circumstance(&self, modifier: &CircumstanceModifier) -> Self {
        let mut applied = self.applied.clone();
        if modifier.value != 0 {
            applied.push(AppliedModifier {
                name: modifier.name.clone(),
                source: modifier.source,
                value: modifier.value,
            });
        }
        Self::new(self.stat.clone(), self.base, applied)
    }
}

impl std::fmt::Display for StatModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.value >= 0 {
            write!(f, "{} +{}", self.stat, self.value)
        } else {
            write!(f, "{} {}", self.stat, self.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherent_matches_target_and_descendants() {
        let belt = InherentModifier::new("Giant's Belt", ModifierSource::Equipment, "Body", 2);
        let muscles = catalog().get("Muscles").unwrap();
        let body = catalog().get("Body").unwrap();
        let mind = catalog().get("Mind").unwrap();
        assert!(belt.applies_to(body));
        assert!(belt.applies_to(muscles));
        assert!(!belt.applies_to(mind));
    }

    #[test]
    fn stat_modifier_sums_applied() {
        let applied = vec![
            AppliedModifier {
                name: "Blessing".to_string(),
                source: ModifierSource::Feat,
                value: 2,
            },
            AppliedModifier {
                name: "Fatigue".to_string(),
                source: ModifierSource::Circumstance,
                value: -1,
            },
        ];
        let resolved = StatModifier::new("STR", 3, applied);
        assert_eq!(resolved.value, 4);
    }

    #[test]
    fn with_circumstance_appends_and_recomputes() {
        let resolved = StatModifier::new("STR", 3, Vec::new());
        let adjusted = resolved.with_circumstance(&CircumstanceModifier::new(
            "High Ground",
            ModifierSource::Circumstance,
            1,
        ));
        assert_eq!(adjusted.value, 4);
        assert_eq!(adjusted.applied.len(), 1);
        // original untouched
        assert_eq!(resolved.value, 3);
    }

    #[test]
    fn with_circumstance_drops_zero_values() {
        let resolved = StatModifier::new("STR", 3, Vec::new());
        let adjusted = resolved.with_circumstance(&CircumstanceModifier::new(
            "Nothing",
            ModifierSource::Circumstance,
            0,
        ));
        assert!(adjusted.applied.is_empty());
        assert_eq!(adjusted.value, 3);
    }

    #[test]
    fn display() {
        assert_eq!(StatModifier::new("STR", 3, Vec::new()).to_string(), "STR +3");
        assert_eq!(
            StatModifier::new("STR", -2, Vec::new()).to_string(),
            "STR -2"
        );
    }

    #[test]
    fn source_display() {
        assert_eq!(ModifierSource::Feat.to_string(), "feat");
        assert_eq!(ModifierSource::Augmentation.to_string(), "augmentation");
    }
}
