//! The d12 resolution engine.
//!
//! A roll draws two base dice, plus up to one Extra and one Luck die,
//! in a single batched entropy request. Extra and Luck dice only count
//! toward the selected pair while *valid* (rolled at or under their
//! configured threshold), but every drawn die — valid or not — feeds the
//! crit and auto-fail rules. The two highest valid dice plus the check
//! modifier and any crit bonus make the total; margins beyond the target
//! convert to shifts on a widening ladder.

use serde::{Deserialize, Serialize};

use crate::check::CheckNature;
use crate::entropy::{EntropyDraw, EntropyProvider};
use crate::error::{MechError, MechResult};

/// Faces on the resolution die.
pub const DIE_SIDES: u32 = 12;

/// Bonus granted per triggered crit rule.
pub const CRIT_BONUS: i32 = 6;

/// Excess required for the first shift; each later tier's increment
/// grows by this much again (6, 18, 36, 60, ...).
pub const SHIFT_STEP: i32 = 6;

/// The role a die plays in the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieTag {
    /// One of the two always-counted base dice.
    Base,
    /// An extra die bought with an attribute.
    Extra,
    /// A luck die backed by Fortune.
    Luck,
}

impl std::fmt::Display for DieTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Extra => write!(f, "extra"),
            Self::Luck => write!(f, "luck"),
        }
    }
}

/// Configuration for an optional Extra or Luck die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusDie {
    /// What grants the die (e.g. the attribute or Fortune source).
    pub descriptor: String,
    /// The die is valid only when it rolls at or under this value.
    pub threshold: i32,
}

impl BonusDie {
    /// Create a bonus die gated by a threshold.
    pub fn new(descriptor: impl Into<String>, threshold: i32) -> Self {
        Self {
            descriptor: descriptor.into(),
            threshold,
        }
    }
}

/// One drawn die after tagging and validity marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledDie {
    /// Role in the pool.
    pub tag: DieTag,
    /// The rolled face.
    pub value: u32,
    /// Whether the die may be selected. Base dice are always valid;
    /// Extra/Luck dice validate against their threshold.
    pub valid: bool,
}

/// Everything needed to resolve one roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollSpec {
    /// The check's resolved modifier value, added to the selected dice.
    pub modifier_value: i32,
    /// Acting or resisting; decides auto-fail and tie handling.
    pub nature: CheckNature,
    /// Difficulty to beat. `None` leaves success undefined (raw or
    /// externally contested rolls).
    pub target: Option<i32>,
    /// Optional third die gated by an attribute score.
    pub extra: Option<BonusDie>,
    /// Optional fourth die gated by a Fortune score.
    pub luck: Option<BonusDie>,
}

impl RollSpec {
    /// A bare two-die roll.
    pub fn new(modifier_value: i32, nature: CheckNature) -> Self {
        Self {
            modifier_value,
            nature,
            target: None,
            extra: None,
            luck: None,
        }
    }

    /// Set the difficulty.
    pub fn with_target(mut self, target: i32) -> Self {
        self.target = Some(target);
        self
    }

    /// Request an extra die.
    pub fn with_extra(mut self, die: BonusDie) -> Self {
        self.extra = Some(die);
        self
    }

    /// Request a luck die.
    pub fn with_luck(mut self, die: BonusDie) -> Self {
        self.luck = Some(die);
        self
    }

    /// Size of the dice pool: 2 base plus each requested bonus die.
    pub fn dice_count(&self) -> usize {
        2 + usize::from(self.extra.is_some()) + usize::from(self.luck.is_some())
    }
}

/// The structured result of one resolution pass.
#[derive(Debug, Clone)]
pub struct RollOutcome<C> {
    /// Every drawn die, tagged and validity-marked, in draw order.
    pub dice: Vec<RolledDie>,
    /// Total crit bonus: +6 for a max face, +6 for any duplicate value,
    /// computed over all drawn dice regardless of validity.
    pub crit_modifiers: i32,
    /// Two or more 1s on an Active check: unconditional failure.
    pub auto_fail: bool,
    /// The two highest valid die values, descending.
    pub selected: [u32; 2],
    /// Selected dice + modifier + crit bonus.
    pub total: i32,
    /// Success against the target, `None` when no target was given.
    pub success: Option<bool>,
    /// Degrees of success beyond the bare win; nonzero only on success.
    pub shifts: u32,
    /// The entropy provider's pass-through context.
    pub context: C,
}

/// Resolve a roll: one batched entropy draw, then a single scoring pass.
pub async fn resolve<P: EntropyProvider>(
    spec: &RollSpec,
    provider: &mut P,
) -> MechResult<RollOutcome<P::Context>> {
    let draw = provider.draw(spec.dice_count()).await;
    resolve_draw(spec, draw)
}

/// Score an already-drawn batch of dice.
///
/// Split from [`resolve`] so deterministic tests and replays can bypass
/// the entropy boundary entirely.
pub fn resolve_draw<C>(spec: &RollSpec, draw: EntropyDraw<C>) -> MechResult<RollOutcome<C>> {
    let expected = spec.dice_count();
    if draw.values.len() != expected {
        return Err(MechError::EntropyCount {
            expected,
            got: draw.values.len(),
        });
    }
    if let Some(&bad) = draw
        .values
        .iter()
        .find(|v| !(1..=DIE_SIDES).contains(*v))
    {
        return Err(MechError::EntropyRange(bad));
    }

    let dice = tag_dice(spec, &draw.values);
    let crit_modifiers = crit_modifiers(&draw.values);
    let ones = draw.values.iter().filter(|&&v| v == 1).count();
    let auto_fail = spec.nature == CheckNature::Active && ones >= 2;

    let mut valid: Vec<u32> = dice.iter().filter(|d| d.valid).map(|d| d.value).collect();
    valid.sort_unstable_by(|a, b| b.cmp(a));
    let selected = [valid[0], valid[1]];

    let total = (selected[0] + selected[1]) as i32 + spec.modifier_value + crit_modifiers;

    let success = spec.target.map(|dc| {
        if auto_fail {
            false
        } else {
            match spec.nature {
                CheckNature::Active => total > dc || (total == dc && crit_modifiers != 0),
                CheckNature::Resisted => total >= dc,
            }
        }
    });

    let shifts = match (success, spec.target) {
        (Some(true), Some(dc)) => shift_count(total - dc),
        _ => 0,
    };

    Ok(RollOutcome {
        dice,
        crit_modifiers,
        auto_fail,
        selected,
        total,
        success,
        shifts,
        context: draw.context,
    })
}

/// Tag drawn values base/extra/luck in draw order and mark validity.
fn tag_dice(spec: &RollSpec, values: &[u32]) -> Vec<RolledDie> {
    let mut dice = Vec::with_capacity(values.len());
    for (idx, &value) in values.iter().enumerate() {
        let (tag, threshold) = match idx {
            0 | 1 => (DieTag::Base, None),
            2 if spec.extra.is_some() => (DieTag::Extra, spec.extra.as_ref()),
            _ => (DieTag::Luck, spec.luck.as_ref()),
        };
        let threshold = threshold.map(|d| d.threshold);
        let valid = threshold.is_none_or(|t| value as i32 <= t);
        dice.push(RolledDie { tag, value, valid });
    }
    dice
}

/// Crit bonus over all drawn dice: +6 for any max face, +6 for any
/// value appearing at least twice. Both can trigger, capping at +12.
fn crit_modifiers(values: &[u32]) -> i32 {
    let mut crit = 0;
    if values.contains(&DIE_SIDES) {
        crit += CRIT_BONUS;
    }
    let has_duplicate = values
        .iter()
        .enumerate()
        .any(|(idx, v)| values[..idx].contains(v));
    if has_duplicate {
        crit += CRIT_BONUS;
    }
    crit
}

/// The widening shift ladder: the first shift needs 6 excess, the
/// second 18 cumulative, the third 36, each tier's increment growing by
/// another 6.
fn shift_count(excess: i32) -> u32 {
    let mut shifts = 0;
    let mut step = SHIFT_STEP;
    let mut threshold = SHIFT_STEP;
    while excess >= threshold {
        shifts += 1;
        step += SHIFT_STEP;
        threshold += step;
    }
    shifts
}
