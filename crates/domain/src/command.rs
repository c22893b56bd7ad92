//! Per-request command context and the republishable temperature command.

use serde::{Deserialize, Serialize};

use crate::duration::HoldDuration;

/// Who triggered this invocation.
///
/// `Callback` marks the timer service firing a previously-armed hold; such an
/// invocation must never arm a new hold, or the turn-off would re-schedule
/// itself forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    User,
    Callback,
}

/// Identity and provenance of one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandContext {
    pub user_id: String,
    pub source: Source,
}

impl CommandContext {
    /// Context for a fresh user command.
    #[must_use]
    pub fn user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            source: Source::User,
        }
    }

    /// Context for a timer-service callback replay.
    #[must_use]
    pub fn callback(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            source: Source::Callback,
        }
    }

    /// True for fresh user commands (the only ones allowed to touch holds).
    #[must_use]
    pub fn is_user(&self) -> bool {
        self.source == Source::User
    }
}

/// Heating mode requested by a temperature command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnOff {
    On,
    Off,
}

/// A set-temperature command as carried on the message channel.
///
/// When a write cannot complete inside the interactive time budget, the
/// command is republished with `defer` cleared so the reprocessing pass
/// performs the real write. The flag is never mutated in place — consumption
/// produces a fresh copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureCommand {
    pub context: CommandContext,
    pub target_temperature: f64,
    pub duration: Option<HoldDuration>,
    pub mode: OnOff,
    /// Whether this command may still be handed to the channel.
    pub defer: bool,
}

impl TemperatureCommand {
    /// Copy of this command with the defer flag consumed.
    #[must_use]
    pub fn consumed(&self) -> Self {
        Self {
            defer: false,
            ..self.clone()
        }
    }
}
