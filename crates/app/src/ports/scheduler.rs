//! Hold scheduler port — arming, cancelling, and observing timed holds.

use std::future::Future;

use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::hold::{HoldIntent, HoldState};

/// Manages the single outstanding "turn heating off later" hold per user.
///
/// Two implementations exist: [`DurableHoldScheduler`] backed by the external
/// timer service, and [`NoopHoldScheduler`] for deployments without one. Both
/// honour the same contract so the orchestration services never branch on
/// which is configured.
///
/// [`DurableHoldScheduler`]: crate::hold::durable::DurableHoldScheduler
/// [`NoopHoldScheduler`]: crate::hold::noop::NoopHoldScheduler
pub trait HoldScheduler: Send + Sync {
    /// Arm a hold for `duration`, replacing the user's outstanding one.
    ///
    /// An absent or zero duration arms nothing and must not contact the
    /// timer service. Otherwise the prior execution is cancelled (only if
    /// still running), a new delayed turn-off is started, and the new
    /// execution id is persisted onto the profile.
    fn hold_if_required_for(
        &self,
        user_id: &str,
        duration: Option<HoldDuration>,
    ) -> impl Future<Output = Result<HoldIntent, HeatHubError>> + Send;

    /// Best-effort cancellation of an outstanding execution. `None` is a
    /// no-op; timer-service failures are logged and swallowed so an
    /// unreachable scheduler never blocks a turn-off request.
    fn stop_hold_if_required(
        &self,
        execution_id: Option<&str>,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;

    /// Live state of the user's outstanding hold, or
    /// [`HoldState::not_applicable`](heathub_domain::hold::HoldState::not_applicable)
    /// when none is armed.
    fn status(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<HoldState, HeatHubError>> + Send;
}
