//! Core stat engine for the Dodeka d12 ruleset.
//!
//! Derives every character statistic from a flat property map: the
//! fixed Level/Realm/Attribute/Skill hierarchy, additive modifiers from
//! feats and gear, formula-driven derived values, and the five resource
//! pools. Everything here is pure computation over its inputs — no I/O,
//! no storage, no randomness. Dice live in `dk-mechanics`.

pub mod catalog;
pub mod error;
pub mod formula;
pub mod modifier;
pub mod props;
pub mod resource;
pub mod tree;

pub use catalog::{Catalog, StatType, Tier, catalog};
pub use error::{CoreError, CoreResult};
pub use formula::{Factor, Formula, FormulaValue, Rounding};
pub use modifier::{
    AppliedModifier, CircumstanceModifier, InherentModifier, ModifierSource, StatModifier,
};
pub use props::{Props, parse_share_string, to_share_string};
pub use resource::{RESOURCE_UNSET, Resource, ResourceState};
pub use tree::{NodeStatModifier, StatTree};
