//! Hold types — the timer service's view of a scheduled turn-off.

use serde::{Deserialize, Serialize};

use crate::command::CommandContext;
use crate::duration::HoldDuration;
use crate::time::Timestamp;

/// Lifecycle state of one execution on the durable-timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Running,
    Succeeded,
    Stopped,
    /// Unknown to the service, or an unrecognized status string.
    #[serde(other)]
    NotFound,
}

impl ExecutionStatus {
    /// True while the delayed callback is still pending.
    #[must_use]
    pub fn is_running(self) -> bool {
        self == Self::Running
    }
}

/// Outcome of asking the scheduler to arm a hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldIntent {
    pub holding: bool,
    pub duration: Option<HoldDuration>,
    pub execution_id: Option<String>,
}

impl HoldIntent {
    /// No hold was (or could be) armed.
    #[must_use]
    pub fn none() -> Self {
        Self {
            holding: false,
            duration: None,
            execution_id: None,
        }
    }

    /// A hold was armed for `duration` under `execution_id`.
    #[must_use]
    pub fn armed(duration: HoldDuration, execution_id: impl Into<String>) -> Self {
        Self {
            holding: true,
            duration: Some(duration),
            execution_id: Some(execution_id.into()),
        }
    }
}

/// Live view of a user's outstanding hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoldState {
    pub status: ExecutionStatus,
    /// Armed duration, recovered from the execution's stored payload.
    pub duration: Option<HoldDuration>,
    /// When the timer service started running the execution.
    pub started_at: Option<Timestamp>,
}

impl HoldState {
    /// State reported when no execution is outstanding.
    #[must_use]
    pub fn not_applicable() -> Self {
        Self {
            status: ExecutionStatus::NotFound,
            duration: None,
            started_at: None,
        }
    }

    /// Time left before the hold fires, measured at `now`.
    ///
    /// `None` unless the execution is running with a known duration and
    /// start time. Clamps at zero when the hold is overdue.
    #[must_use]
    pub fn remaining_at(&self, now: Timestamp) -> Option<HoldDuration> {
        if !self.status.is_running() {
            return None;
        }
        let duration = self.duration?;
        let started_at = self.started_at?;
        let elapsed = now.signed_duration_since(started_at).num_seconds().max(0);
        #[allow(clippy::cast_sign_loss)]
        let elapsed = HoldDuration::from_seconds(elapsed as u64);
        Some(duration.saturating_sub(elapsed))
    }
}

/// Payload stored with the timer service when a hold is armed.
///
/// Played back verbatim when the timer fires, it must round-trip the armed
/// duration and the target user so the callback can be routed as a
/// "turn heating off" command with [`Source::Callback`](crate::command::Source).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOffCallback {
    pub version: String,
    pub user_id: String,
    /// Armed duration in whole seconds.
    pub duration: u64,
}

impl TurnOffCallback {
    /// Build the envelope for one armed hold.
    #[must_use]
    pub fn new(user_id: impl Into<String>, duration: HoldDuration) -> Self {
        Self {
            version: "1.0".to_string(),
            user_id: user_id.into(),
            duration: duration.in_seconds(),
        }
    }

    /// The armed duration carried by this envelope.
    #[must_use]
    pub fn armed_duration(&self) -> HoldDuration {
        HoldDuration::from_seconds(self.duration)
    }

    /// Command context for replaying this callback.
    #[must_use]
    pub fn context(&self) -> CommandContext {
        CommandContext::callback(self.user_id.clone())
    }
}
