//! Checks: a resolved stat modifier plus how the roll is adjudicated.
//!
//! A [`Check`] is built fresh per roll request and never mutated; the
//! only derived form is a copy with one extra circumstance modifier
//! appended for last-mile adjustments ("you do have the high ground").

use serde::{Deserialize, Serialize};

use dk_core::{CircumstanceModifier, StatModifier};

/// How a check's difficulty is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckMode {
    /// Rolled against a fixed difficulty.
    Static,
    /// Rolled against another roll, resolved externally.
    Contested,
}

impl std::fmt::Display for CheckMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => write!(f, "static"),
            Self::Contested => write!(f, "contested"),
        }
    }
}

/// Whether the character is acting or resisting.
///
/// The distinction matters twice during resolution: only Active checks
/// can auto-fail on double 1s, and only Active checks need to beat the
/// target (Resisted checks win ties outright).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckNature {
    /// The character initiates the attempt.
    Active,
    /// The character withstands something done to them.
    Resisted,
}

impl std::fmt::Display for CheckNature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Resisted => write!(f, "resisted"),
        }
    }
}

/// An immutable roll request: what is being attempted and with what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    /// Difficulty mode.
    pub mode: CheckMode,
    /// Acting or resisting.
    pub nature: CheckNature,
    /// Human description of the attempt.
    pub descriptor: String,
    /// The resolved stat backing the roll.
    pub modifier: StatModifier,
}

impl Check {
    /// Create a new check.
    pub fn new(
        mode: CheckMode,
        nature: CheckNature,
        descriptor: impl Into<String>,
        modifier: StatModifier,
    ) -> Self {
        Self {
            mode,
            nature,
            descriptor: descriptor.into(),
            modifier,
        }
    }

    /// Copy with one additional circumstance modifier appended and the
    /// final value recomputed.
    pub fn with_circumstance(&self, modifier: &CircumstanceModifier) -> Self {
        Self {
            mode: self.mode,
            nature: self.nature,
            descriptor: self.descriptor.clone(),
            modifier: self.modifier.with_circumstance(modifier),
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} {}, {})",
            self.descriptor, self.mode, self.nature, self.modifier
        )
    }
}
