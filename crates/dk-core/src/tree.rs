//! The stat tree: point allocations and modifier computation.
//!
//! A [`StatTree`] instantiates the fixed 40-node catalog hierarchy with
//! a character's point allocations and stored inherent modifiers. Trees
//! are built fresh from a property map and treated as read-only
//! afterwards; when an allocation changes, callers rebuild rather than
//! mutate. Allocation legality is therefore exposed as predicates, not
//! mutations.

use crate::catalog::{StatType, catalog};
use crate::error::{CoreError, CoreResult};
use crate::modifier::{AppliedModifier, CircumstanceModifier, InherentModifier, StatModifier};
use crate::props::{Props, int_prop};

/// One allocation node of the tree.
#[derive(Debug, Clone)]
struct Node {
    stat: &'static StatType,
    points: i32,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// A character's allocation state over the full stat hierarchy.
#[derive(Debug, Clone)]
pub struct StatTree {
    nodes: Vec<Node>,
    inherent: Vec<InherentModifier>,
}

/// The computed modifier state of one stat, derived on demand.
///
/// Not stored on the tree; recomputed per query so that circumstance
/// modifiers never leak between reads.
#[derive(Debug, Clone)]
pub struct NodeStatModifier {
    /// The stat this was computed for.
    pub stat: &'static StatType,
    /// The parent's post-cap base value (0 for Level).
    ///
    /// Only raw allocation propagates across tiers; the parent's own
    /// applied modifiers do not compound into children.
    pub parent_value: i32,
    /// `ceil(points * tier multiplier)` — fractional allocations round
    /// in the player's favor.
    pub self_value: i32,
    /// Self plus parent value, before the level cap.
    pub base_pre_cap: i32,
    /// Whether the level cap clamped this stat.
    pub level_capped: bool,
    /// Base value after the level cap.
    pub base: i32,
    /// Every matching nonzero modifier (inherent and circumstantial).
    pub applied: Vec<AppliedModifier>,
    /// Final value: base plus all applied modifiers.
    pub value: i32,
}

impl NodeStatModifier {
    /// Collapse into the resolved form a check embeds.
    pub fn resolved(&self) -> StatModifier {
        StatModifier::new(self.stat.name, self.base, self.applied.clone())
    }
}

impl StatTree {
    /// Build the fixed 40-node tree from a flat property map.
    ///
    /// Missing or malformed entries default to 0 points; negative values
    /// clamp to 0. Lenient on purpose: character sheets must stay
    /// loadable across ruleset revisions.
    pub fn from_props(props: &Props) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(catalog().len());
        for stat in catalog().iter() {
            let points = int_prop(props, stat.name).unwrap_or(0).max(0);
            let parent = stat
                .parent
                .and_then(|name| nodes.iter().position(|n| n.stat.name == name));
            let idx = nodes.len();
            if let Some(parent_idx) = parent {
                nodes[parent_idx].children.push(idx);
            }
            nodes.push(Node {
                stat,
                points,
                parent,
                children: Vec::new(),
            });
        }
        Self {
            nodes,
            inherent: Vec::new(),
        }
    }

    /// Attach the character's stored inherent modifiers.
    pub fn with_inherent(mut self, modifiers: Vec<InherentModifier>) -> Self {
        self.inherent = modifiers;
        self
    }

    /// The stored inherent modifiers.
    pub fn inherent(&self) -> &[InherentModifier] {
        &self.inherent
    }

    /// The character's raw Level points.
    ///
    /// This is narrative "character power", distinct from Level's derived
    /// base value, and the value the level cap clamps against.
    pub fn level(&self) -> i32 {
        self.nodes[0].points
    }

    /// Node index for a stat name; nodes are laid out in catalog order.
    fn node_index(&self, stat: &str) -> CoreResult<usize> {
        catalog()
            .index(stat)
            .ok_or_else(|| CoreError::UnknownStat(stat.to_string()))
    }

    fn node(&self, stat: &str) -> CoreResult<&Node> {
        Ok(&self.nodes[self.node_index(stat)?])
    }

    /// Points allocated directly to a stat.
    pub fn points(&self, stat: &str) -> CoreResult<i32> {
        Ok(self.node(stat)?.points)
    }

    /// Points this node may propagate to its children.
    ///
    /// A node keeps one point for itself to unlock propagation; leaves
    /// propagate nothing.
    pub fn allocatable_points(&self, stat: &str) -> CoreResult<i32> {
        let node = self.node(stat)?;
        Ok(Self::allocatable(node.points, &node.children))
    }

    /// Points already allocated to a stat's children.
    pub fn allocated_points(&self, stat: &str) -> CoreResult<i32> {
        let node = self.node(stat)?;
        Ok(self.allocated(node))
    }

    /// Allocatable minus allocated points.
    ///
    /// May be negative while a sheet is being edited; the domain never
    /// persists a negative state.
    pub fn unallocated_points(&self, stat: &str) -> CoreResult<i32> {
        let node = self.node(stat)?;
        Ok(Self::allocatable(node.points, &node.children) - self.allocated(node))
    }

    /// Whether a point may legally be added to a stat.
    ///
    /// Level always may gain (it is the character's overall power);
    /// every other stat needs an unallocated point on its parent.
    pub fn can_allocate_point(&self, stat: &str) -> CoreResult<bool> {
        let node = self.node(stat)?;
        match node.parent {
            None => Ok(true),
            Some(parent_idx) => {
                let parent = &self.nodes[parent_idx];
                Ok(Self::allocatable(parent.points, &parent.children) - self.allocated(parent) >= 1)
            }
        }
    }

    /// Whether a point may legally be removed from a stat.
    ///
    /// Requires the stat to have points, and its children's allocations
    /// to still fit under the reduced allocatable pool.
    pub fn can_deallocate_point(&self, stat: &str) -> CoreResult<bool> {
        let node = self.node(stat)?;
        if node.points == 0 {
            return Ok(false);
        }
        Ok(self.allocated(node) <= Self::allocatable(node.points - 1, &node.children))
    }

    /// Compute a stat's modifier state with no circumstance modifiers.
    pub fn modifier(&self, stat: &str) -> CoreResult<NodeStatModifier> {
        self.modifier_with(stat, &[])
    }

    /// Compute a stat's modifier state, including per-query
    /// circumstance modifiers.
    pub fn modifier_with(
        &self,
        stat: &str,
        circumstance: &[CircumstanceModifier],
    ) -> CoreResult<NodeStatModifier> {
        let idx = self.node_index(stat)?;
        let node = &self.nodes[idx];
        let stat = node.stat;

        let parent_value = node.parent.map_or(0, |p| self.base_value(p));
        let self_value = Self::self_value(node);
        let base_pre_cap = self_value + parent_value;
        let level_capped = node.stat.tier.level_capped() && base_pre_cap > self.level();
        let base = if level_capped {
            self.level()
        } else {
            base_pre_cap
        };

        let mut applied: Vec<AppliedModifier> = self
            .inherent
            .iter()
            .filter(|m| m.value != 0 && m.applies_to(stat))
            .map(|m| AppliedModifier {
                name: m.name.clone(),
                source: m.source,
                value: m.value,
            })
            .collect();
        applied.extend(
            circumstance
                .iter()
                .filter(|m| m.value != 0)
                .map(|m| AppliedModifier {
                    name: m.name.clone(),
                    source: m.source,
                    value: m.value,
                }),
        );

        let value = base + applied.iter().map(|m| m.value).sum::<i32>();
        Ok(NodeStatModifier {
            stat,
            parent_value,
            self_value,
            base_pre_cap,
            level_capped,
            base,
            applied,
            value,
        })
    }

    /// A node's post-cap base value, the quantity that propagates to
    /// children as their parent value.
    fn base_value(&self, idx: usize) -> i32 {
        let node = &self.nodes[idx];
        let parent_value = node.parent.map_or(0, |p| self.base_value(p));
        let pre_cap = Self::self_value(node) + parent_value;
        if node.stat.tier.level_capped() && pre_cap > self.level() {
            self.level()
        } else {
            pre_cap
        }
    }

    fn self_value(node: &Node) -> i32 {
        let (num, den) = node.stat.tier.multiplier();
        (node.points * num + den - 1) / den
    }

    fn allocatable(points: i32, children: &[usize]) -> i32 {
        if children.is_empty() {
            0
        } else {
            (points - 1).max(0)
        }
    }

    fn allocated(&self, node: &Node) -> i32 {
        node.children
            .iter()
            .map(|&child| self.nodes[child].points)
            .sum()
    }
}
