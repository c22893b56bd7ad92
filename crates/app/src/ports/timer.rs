//! Timer port — the external durable-timer service behind the hold scheduler.

use std::future::Future;

use heathub_domain::duration::HoldDuration;
use heathub_domain::error::HeatHubError;
use heathub_domain::hold::{ExecutionStatus, TurnOffCallback};
use heathub_domain::time::Timestamp;

/// Live description of one execution, as reported by the timer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRecord {
    pub status: ExecutionStatus,
    /// When the service began running the execution.
    pub started_at: Option<Timestamp>,
    /// The stored payload, round-tripping the armed duration and user id.
    pub payload: TurnOffCallback,
}

/// Client for the external durable-timer service.
pub trait TimerClient: Send + Sync {
    /// Start a delayed execution that plays `payload` back after `delay`.
    /// Returns the new execution id.
    fn start(
        &self,
        payload: &TurnOffCallback,
        delay: HoldDuration,
    ) -> impl Future<Output = Result<String, HeatHubError>> + Send;

    /// Query the live state of an execution.
    fn describe(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<ExecutionRecord, HeatHubError>> + Send;

    /// Cancel a running execution.
    fn stop(
        &self,
        execution_id: &str,
    ) -> impl Future<Output = Result<(), HeatHubError>> + Send;
}
