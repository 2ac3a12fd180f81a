//! The `/d12` roll-command wire format.
//!
//! A resolved roll request serializes to a single chat-style line:
//! `/d12 {json}`. The JSON carries the check's descriptor, mode, nature,
//! and full modifier breakdown, plus optional Extra/Luck dice and the
//! target difficulty — enough for any host to rehydrate the request and
//! resolve it. Decoding is tolerant only of the documented shape.

use serde::{Deserialize, Serialize};

use crate::check::Check;
use crate::error::{MechError, MechResult};
use crate::roll::{BonusDie, RollSpec};

/// Prefix every encoded roll command starts with.
pub const COMMAND_PREFIX: &str = "/d12 ";

/// A complete, transportable roll request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollCommand {
    /// The check being rolled.
    pub check: Check,
    /// Optional extra die with its gating threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<BonusDie>,
    /// Optional luck die with its gating threshold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luck: Option<BonusDie>,
    /// Difficulty to beat, absent for raw or contested rolls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<i32>,
}

impl RollCommand {
    /// A command for a bare check.
    pub fn new(check: Check) -> Self {
        Self {
            check,
            extra: None,
            luck: None,
            target: None,
        }
    }

    /// Attach an extra die.
    pub fn with_extra(mut self, die: BonusDie) -> Self {
        self.extra = Some(die);
        self
    }

    /// Attach a luck die.
    pub fn with_luck(mut self, die: BonusDie) -> Self {
        self.luck = Some(die);
        self
    }

    /// Set the target difficulty.
    pub fn with_target(mut self, target: i32) -> Self {
        self.target = Some(target);
        self
    }

    /// Serialize to a `/d12 {json}` line.
    pub fn encode(&self) -> MechResult<String> {
        Ok(format!("{COMMAND_PREFIX}{}", serde_json::to_string(self)?))
    }

    /// Rehydrate a command from a `/d12 {json}` line.
    pub fn decode(line: &str) -> MechResult<Self> {
        let payload = line
            .strip_prefix(COMMAND_PREFIX)
            .ok_or(MechError::CommandPrefix)?;
        Ok(serde_json::from_str(payload)?)
    }

    /// The roll configuration this command resolves with.
    pub fn spec(&self) -> RollSpec {
        let mut spec =
            RollSpec::new(self.check.modifier.value, self.check.nature);
        if let Some(target) = self.target {
            spec = spec.with_target(target);
        }
        if let Some(extra) = &self.extra {
            spec = spec.with_extra(extra.clone());
        }
        if let Some(luck) = &self.luck {
            spec = spec.with_luck(luck.clone());
        }
        spec
    }
}
