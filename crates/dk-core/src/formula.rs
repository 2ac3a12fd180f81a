//! Composable additive formulas over stat values.
//!
//! Derived stats (movement, initiative, resource maxima) are sums of
//! [`Factor`]s: constants, scaled stat values, or the character's raw
//! Level. Computing a formula yields both the number and a human-readable
//! additive breakdown — every derived-stat display must be able to
//! explain its math, so the breakdown is a first-class output.

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::tree::StatTree;

/// How a fractional stat term is rounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Round up.
    Ceil,
    /// Round down.
    Floor,
    /// Round to the nearest integer.
    Nearest,
}

impl Rounding {
    fn apply(self, value: f64) -> i32 {
        let rounded = match self {
            Self::Ceil => value.ceil(),
            Self::Floor => value.floor(),
            Self::Nearest => value.round(),
        };
        rounded as i32
    }
}

/// One additive term of a formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    /// A flat constant.
    Constant(i32),
    /// A stat's final modified value, scaled and rounded.
    Stat {
        /// Name of the stat to read.
        stat: String,
        /// Scale applied to the stat value before rounding.
        coefficient: f64,
        /// Rounding mode for fractional results.
        rounding: Rounding,
    },
    /// The character's raw, uncapped Level points.
    ///
    /// The only place raw Level is exposed: it stands for narrative
    /// character power rather than a capped derived stat.
    Level,
}

/// A sum of factors, pure and side-effect-free.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    factors: Vec<Factor>,
}

/// A computed formula: the number plus its additive breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaValue {
    /// The numeric result.
    pub value: i32,
    /// Tooltip-ready rendering, e.g. `4 + Mind (2) = 6`.
    pub breakdown: String,
}

impl Formula {
    /// An empty formula (computes to 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a constant term.
    pub fn with_constant(mut self, value: i32) -> Self {
        self.factors.push(Factor::Constant(value));
        self
    }

    /// Append a stat term with coefficient 1.
    pub fn with_stat(self, stat: impl Into<String>) -> Self {
        self.with_scaled_stat(stat, 1.0, Rounding::Floor)
    }

    /// Append a scaled stat term.
    pub fn with_scaled_stat(
        mut self,
        stat: impl Into<String>,
        coefficient: f64,
        rounding: Rounding,
    ) -> Self {
        self.factors.push(Factor::Stat {
            stat: stat.into(),
            coefficient,
            rounding,
        });
        self
    }

    /// Append a raw-Level term.
    pub fn with_level(mut self) -> Self {
        self.factors.push(Factor::Level);
        self
    }

    /// The factors of this formula, in order.
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Evaluate against a tree, producing the value and its breakdown.
    pub fn compute(&self, tree: &StatTree) -> CoreResult<FormulaValue> {
        let mut total = 0;
        let mut parts = Vec::with_capacity(self.factors.len());

        for factor in &self.factors {
            let (term, label) = match factor {
                Factor::Constant(value) => (*value, value.to_string()),
                Factor::Stat {
                    stat,
                    coefficient,
                    rounding,
                } => {
                    let stat_value = tree.modifier(stat)?.value;
                    let term = if (*coefficient - 1.0).abs() < f64::EPSILON {
                        stat_value
                    } else {
                        rounding.apply(coefficient * f64::from(stat_value))
                    };
                    let label = if (*coefficient - 1.0).abs() < f64::EPSILON {
                        format!("{stat} ({term})")
                    } else {
                        format!("{coefficient}\u{d7}{stat} ({term})")
                    };
                    (term, label)
                }
                Factor::Level => {
                    let level = tree.level();
                    (level, format!("Level ({level})"))
                }
            };
            total += term;
            parts.push(label);
        }

        let breakdown = if parts.is_empty() {
            "0".to_string()
        } else {
            format!("{} = {total}", parts.join(" + "))
        };
        Ok(FormulaValue {
            value: total,
            breakdown,
        })
    }
}

/// Composing formulas concatenates factor lists without evaluating
/// either side. The numeric result is order-independent; only the
/// breakdown ordering follows the concatenation.
impl std::ops::Add for Formula {
    type Output = Formula;

    fn add(mut self, other: Formula) -> Formula {
        self.factors.extend(other.factors);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props::Props;

    fn tree_of(entries: &[(&str, &str)]) -> StatTree {
        let props: Props = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StatTree::from_props(&props)
    }

    #[test]
    fn constant_only() {
        let tree = tree_of(&[]);
        let result = Formula::new().with_constant(4).compute(&tree).unwrap();
        assert_eq!(result.value, 4);
        assert_eq!(result.breakdown, "4 = 4");
    }

    #[test]
    fn constant_plus_stat() {
        let tree = tree_of(&[("Level", "2"), ("Mind", "1")]);
        let result = Formula::new()
            .with_constant(4)
            .with_stat("Mind")
            .compute(&tree)
            .unwrap();
        assert_eq!(result.value, 6);
        assert_eq!(result.breakdown, "4 + Mind (2) = 6");
    }

    #[test]
    fn raw_level_is_uncapped() {
        let tree = tree_of(&[("Level", "6")]);
        let result = Formula::new().with_level().compute(&tree).unwrap();
        // Level's derived base would be ceil(6/4) = 2; the raw term is 6.
        assert_eq!(result.value, 6);
        assert_eq!(result.breakdown, "Level (6) = 6");
    }

    #[test]
    fn scaled_stat_rounding_modes() {
        let tree = tree_of(&[("Level", "3"), ("Body", "2"), ("DEX", "1")]);
        // DEX value: self 1 + parent (Body base 2) = 3.
        let dex = tree.modifier("DEX").unwrap().value;
        assert_eq!(dex, 3);
        let half = |rounding| {
            Formula::new()
                .with_scaled_stat("DEX", 0.5, rounding)
                .compute(&tree)
                .unwrap()
                .value
        };
        assert_eq!(half(Rounding::Floor), 1);
        assert_eq!(half(Rounding::Ceil), 2);
        assert_eq!(half(Rounding::Nearest), 2);
    }

    #[test]
    fn add_concatenates_without_evaluating() {
        let a = Formula::new().with_constant(4);
        let b = Formula::new().with_level();
        let combined = a + b;
        assert_eq!(combined.factors().len(), 2);
    }

    #[test]
    fn add_is_order_independent_in_value() {
        let tree = tree_of(&[("Level", "2"), ("Body", "1"), ("Mind", "1")]);
        let a = Formula::new().with_constant(4).with_stat("Body");
        let b = Formula::new().with_stat("Mind").with_level();
        let ab = (a.clone() + b.clone()).compute(&tree).unwrap();
        let ba = (b + a).compute(&tree).unwrap();
        assert_eq!(ab.value, ba.value);
        // Only the tooltip ordering differs.
        assert_ne!(ab.breakdown, ba.breakdown);
    }

    #[test]
    fn empty_formula_is_zero() {
        let tree = tree_of(&[]);
        let result = Formula::new().compute(&tree).unwrap();
        assert_eq!(result.value, 0);
        assert_eq!(result.breakdown, "0");
    }

    #[test]
    fn unknown_stat_errors() {
        let tree = tree_of(&[]);
        assert!(Formula::new().with_stat("Sorcery").compute(&tree).is_err());
    }
}
