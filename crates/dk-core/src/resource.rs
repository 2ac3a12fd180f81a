//! Resource pools: Action, Vitality, Focus, Spirit, and Heroism Points.
//!
//! Each pool's maximum is a [`Formula`] over the stat tree; the current
//! value lives in the character property map as a per-resource integer,
//! with `-1` as the "unset" sentinel meaning "always track at maximum."
//! A freshly-leveled character's pools grow automatically because the
//! sentinel re-resolves against the new maxima without any migration.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::formula::{Formula, FormulaValue};
use crate::props::{Props, int_prop};
use crate::tree::StatTree;

/// Stored current value meaning "always equal to the maximum."
pub const RESOURCE_UNSET: i32 = -1;

/// One of the five resource pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// Action Points, spent to act in a round.
    Action,
    /// Vitality, the body's reserve against harm.
    Vitality,
    /// Focus, the mind's reserve for exacting work.
    Focus,
    /// Spirit, the soul's reserve for feats of will.
    Spirit,
    /// Heroism Points, banked narrative weight.
    Heroism,
}

static MAXIMA: LazyLock<HashMap<Resource, Formula>> = LazyLock::new(|| {
    HashMap::from([
        (Resource::Action, Formula::new().with_constant(4)),
        (
            Resource::Vitality,
            Formula::new().with_constant(4).with_stat("Body"),
        ),
        (
            Resource::Focus,
            Formula::new().with_constant(4).with_stat("Mind"),
        ),
        (
            Resource::Spirit,
            Formula::new().with_constant(4).with_stat("Soul"),
        ),
        (Resource::Heroism, Formula::new().with_level()),
    ])
});

impl Resource {
    /// All five pools, in display order.
    pub const ALL: [Resource; 5] = [
        Resource::Action,
        Resource::Vitality,
        Resource::Focus,
        Resource::Spirit,
        Resource::Heroism,
    ];

    /// The property-map key holding this pool's current value.
    pub fn key(self) -> &'static str {
        match self {
            Self::Action => "Action",
            Self::Vitality => "Vitality",
            Self::Focus => "Focus",
            Self::Spirit => "Spirit",
            Self::Heroism => "Heroism",
        }
    }

    /// Human display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Action => "Action Points",
            Self::Vitality => "Vitality",
            Self::Focus => "Focus",
            Self::Spirit => "Spirit",
            Self::Heroism => "Heroism Points",
        }
    }

    /// Reverse lookup from a property-map key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.key() == key)
    }

    /// The formula defining this pool's maximum.
    pub fn formula(self) -> &'static Formula {
        &MAXIMA[&self]
    }

    /// Compute this pool's maximum with its breakdown.
    pub fn maximum(self, tree: &StatTree) -> CoreResult<FormulaValue> {
        self.formula().compute(tree)
    }

    /// Resolve this pool's state from the tree and property map.
    ///
    /// A missing key, malformed value, or the `-1` sentinel resolves the
    /// current value to the maximum; stored values are clamped into
    /// `[0, max]` on read.
    pub fn state(self, tree: &StatTree, props: &Props) -> CoreResult<ResourceState> {
        let max = self.maximum(tree)?.value;
        let current = match int_prop(props, self.key()) {
            Some(stored) if stored != RESOURCE_UNSET => stored.clamp(0, max),
            _ => max,
        };
        Ok(ResourceState {
            resource: self,
            current,
            max,
        })
    }

    /// Apply a delta to this pool, clamped to `[0, max]`, writing the
    /// result back into the property map. Returns the new current value.
    ///
    /// This is the only defined mutation path for resource values. When
    /// the clamped result equals the maximum the sentinel is stored
    /// instead, so the pool keeps tracking future maximum growth.
    pub fn update(self, tree: &StatTree, props: &mut Props, delta: i32) -> CoreResult<i32> {
        let state = self.state(tree, props)?;
        let current = (state.current + delta).clamp(0, state.max);
        let stored = if current == state.max {
            RESOURCE_UNSET
        } else {
            current
        };
        props.insert(self.key().to_string(), stored.to_string());
        Ok(current)
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A resolved pool: its current value and maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Which pool this is.
    pub resource: Resource,
    /// Current value, sentinel already resolved.
    pub current: i32,
    /// Maximum from the pool's formula.
    pub max: i32,
}

impl std::fmt::Display for ResourceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.resource, self.current, self.max)
    }
}
