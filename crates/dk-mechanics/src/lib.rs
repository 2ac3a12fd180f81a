//! Check and dice resolution for the Dodeka d12 ruleset.
//!
//! Builds on `dk-core`'s resolved stat values: construct a [`Check`],
//! turn it into a [`RollSpec`] (directly or via the `/d12` command
//! format), and resolve it against an injected [`EntropyProvider`].
//! The engine is stateless between calls; the entropy draw is its only
//! suspension point.

pub mod check;
pub mod command;
pub mod entropy;
pub mod error;
pub mod roll;

pub use check::{Check, CheckMode, CheckNature};
pub use command::{COMMAND_PREFIX, RollCommand};
pub use entropy::{EntropyDraw, EntropyProvider, RngEntropy, ScriptedEntropy};
pub use error::{MechError, MechResult};
pub use roll::{
    BonusDie, CRIT_BONUS, DIE_SIDES, DieTag, RollOutcome, RollSpec, RolledDie, SHIFT_STEP,
    resolve, resolve_draw,
};
